use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thumbpress::{
    ImageCodec, PipelineError, Quality, SizeSpec, ThumbReport, ThumbRequest, pipeline,
};

/// Exit code for an unreadable or unparseable input file (EX_NOINPUT),
/// distinct from the generic failure code used for encode errors.
const EXIT_NO_INPUT: u8 = 66;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "thumbpress")]
#[command(about = "Generate a JPEG thumbnail with fit, cover, and crop sizing policies")]
#[command(long_about = "\
Generate a JPEG thumbnail with fit, cover, and crop sizing policies.

Sizes may be absolute pixels or a percentage of the source (\"25%\").
A value of 0 means unspecified and falls back to a 64px default.

Policies, in priority order:
  --max M               pin max(width, height) to M, aspect preserved
  --max M --outbound    pin min(width, height) to M, so an MxM box is covered
  --outbound            cover at least --width x --height on every axis
  (neither)             use --width x --height exactly

With --outbound, --crop trims the scaled image back to the requested size
with a centered crop. The output carries the source's comment-provenance as
Thumb:: metadata, plus any --comment text.")]
#[command(version = version_string())]
struct Cli {
    /// Thumbnail width: pixels or percent of source ("25%"); 0 selects the 64px default
    #[arg(short = 'w', long, value_parser = parse_size_spec, default_value = "0")]
    width: SizeSpec,

    /// Thumbnail height: pixels or percent of source ("25%"); 0 selects the 64px default
    #[arg(short = 'H', long, value_parser = parse_size_spec, default_value = "0")]
    height: SizeSpec,

    /// Bound max(width, height) — or min under --outbound — preserving aspect ratio
    #[arg(short = 'm', long, value_name = "PX")]
    max: Option<u32>,

    /// Cover at least the requested size; the scaled image may exceed it on one axis
    #[arg(short = 'o', long)]
    outbound: bool,

    /// Center-crop the scaled thumbnail back to the requested size (use with --outbound)
    #[arg(short = 'r', long)]
    crop: bool,

    /// JPEG quality 1-100; out-of-range values reset to 85
    #[arg(short = 'q', long, default_value_t = Quality::DEFAULT)]
    quality: u32,

    /// Comment to embed in the output JPEG
    #[arg(short = 'c', long, default_value = "")]
    comment: String,

    /// Report resolved options, source metadata, and the computed geometry
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Source JPEG
    input: PathBuf,

    /// Thumbnail to write
    output: PathBuf,
}

/// Human form of a size request for the verbose report.
fn describe_size(spec: SizeSpec) -> String {
    match spec {
        SizeSpec::Unspecified => format!("{} (default)", thumbpress::DEFAULT_EDGE),
        SizeSpec::Absolute(px) => px.to_string(),
        SizeSpec::Percent(pct) => format!("{pct}%"),
    }
}

/// Parse `N` or `N%` into a tagged size. `0` (with or without `%`) means
/// unspecified and resolves to the default later.
fn parse_size_spec(raw: &str) -> Result<SizeSpec, String> {
    let (digits, percent) = match raw.strip_suffix('%') {
        Some(d) => (d, true),
        None => (raw, false),
    };
    let value: u32 = digits
        .trim()
        .parse()
        .map_err(|_| format!("expected a pixel count or percentage, got '{raw}'"))?;
    Ok(match (value, percent) {
        (0, _) => SizeSpec::Unspecified,
        (v, true) => SizeSpec::Percent(v),
        (v, false) => SizeSpec::Absolute(v),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        if matches!(cli.width, SizeSpec::Unspecified) {
            eprintln!("width unspecified, using default minimum of 64");
        }
        if matches!(cli.height, SizeSpec::Unspecified) {
            eprintln!("height unspecified, using default minimum of 64");
        }
        if !(1..=100).contains(&cli.quality) {
            eprintln!(
                "quality {} out of range, using default of {}",
                cli.quality,
                Quality::DEFAULT
            );
        }
        println!("thumb_width = {}", describe_size(cli.width));
        println!("thumb_height = {}", describe_size(cli.height));
        if let Some(max) = cli.max {
            println!("max_dimension = {max}");
        }
        println!("outbound = {}", cli.outbound);
        println!("crop = {}", cli.crop);
        println!("thumb_quality = {}", Quality::new(cli.quality).value());
        if !cli.comment.is_empty() {
            println!("thumb_comment = {}", cli.comment);
        }
        println!("input = {}", cli.input.display());
        println!("output = {}", cli.output.display());
    }

    let request = ThumbRequest {
        input: cli.input,
        output: cli.output,
        width: cli.width,
        height: cli.height,
        max_dimension: cli.max,
        outbound: cli.outbound,
        crop: cli.crop,
        quality: Quality::new(cli.quality),
        comment: cli.comment,
    };

    let codec = ImageCodec::new();
    match pipeline::run(&codec, &request) {
        Ok(report) => {
            if cli.verbose {
                print_report(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e @ PipelineError::Open { .. }) => {
            eprintln!("thumbpress: {e}");
            ExitCode::from(EXIT_NO_INPUT)
        }
        Err(e) => {
            eprintln!("thumbpress: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &ThumbReport) {
    let source = &report.source;
    println!("Image size: {}x{}", source.size.width, source.size.height);
    if let Some(comment) = &source.comment {
        println!("Comment: {comment}");
    }
    if let Some(thumb) = &source.thumbnail {
        if let Some(mimetype) = &thumb.mimetype {
            println!("Thumb Mimetype: {mimetype}");
        }
        if let Some(uri) = &thumb.uri {
            println!("Thumb URI: {uri}");
        }
        if let Some(mtime) = thumb.mtime {
            println!("Thumb Mtime: {mtime}");
        }
        if let Some(width) = thumb.width {
            println!("Thumb Width: {width}");
        }
        if let Some(height) = thumb.height {
            println!("Thumb Height: {height}");
        }
    }
    let sizing = &report.sizing;
    println!(
        "Thumb size: {}x{}",
        sizing.size.width, sizing.size.height
    );
    println!(
        "Crop (TxBxLxR): {}x{}x{}x{}",
        sizing.crop.top, sizing.crop.bottom, sizing.crop.left, sizing.crop.right
    );
}
