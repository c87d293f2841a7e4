//! Production codec over the `image` crate's pure-Rust JPEG support.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::with_guessed_format` + `into_dimensions` |
//! | Decode-at-size | full decode + `resize_exact` with `Lanczos3` |
//! | Crop | `DynamicImage::crop_imm` |
//! | Encode | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Comments | [`markers`](crate::markers) (COM segments, read and spliced) |
//!
//! libjpeg-style DCT-scaled decoding is approximated by decoding in full and
//! resampling to the computed decode size; the output dimensions are
//! identical either way.

use crate::codec::{CodecError, JpegCodec, SourceInfo};
use crate::geometry::Dimensions;
use crate::markers;
use crate::params::EncodeParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// JPEG backend built on the `image` crate. Stateless; one instance serves
/// any number of requests.
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegCodec for ImageCodec {
    fn identify(&self, path: &Path) -> Result<SourceInfo, CodecError> {
        let bytes = std::fs::read(path)?;

        let reader = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(CodecError::Io)?;
        if reader.format() != Some(ImageFormat::Jpeg) {
            return Err(CodecError::NotAJpeg(path.display().to_string()));
        }
        let (width, height) = reader.into_dimensions().map_err(|e| {
            CodecError::NotAJpeg(format!("{}: {e}", path.display()))
        })?;

        let com = markers::read_com_data(&bytes);
        Ok(SourceInfo {
            size: Dimensions::new(width, height),
            comment: com.comment,
            thumbnail: com.thumbnail,
        })
    }

    fn encode(&self, params: &EncodeParams) -> Result<(), CodecError> {
        if params.decode_size.width == 0 || params.decode_size.height == 0 {
            return Err(CodecError::Encode(format!(
                "degenerate decode size {}x{}",
                params.decode_size.width, params.decode_size.height
            )));
        }

        let img = load_jpeg(&params.source)?;
        let scaled = img.resize_exact(
            params.decode_size.width,
            params.decode_size.height,
            FilterType::Lanczos3,
        );

        let crop = params.crop;
        let out_img = if crop.is_empty() {
            scaled
        } else {
            let kept = crop.applied_to(params.decode_size);
            scaled.crop_imm(crop.left, crop.top, kept.width, kept.height)
        };

        let mut encoded = Vec::new();
        let encoder =
            JpegEncoder::new_with_quality(&mut encoded, params.quality.value() as u8);
        out_img
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        let comments = output_comments(params);
        let finished = markers::insert_com_segments(&encoded, &comments);
        std::fs::write(&params.output, finished)?;
        Ok(())
    }
}

fn load_jpeg(path: &Path) -> Result<DynamicImage, CodecError> {
    ImageReader::open(path)
        .map_err(CodecError::Io)?
        .decode()
        .map_err(|e| CodecError::NotAJpeg(format!("{}: {e}", path.display())))
}

/// COM segments for the output: the caller's comment, then a `Thumb::`
/// block describing the source (freedesktop thumbnail convention).
fn output_comments(params: &EncodeParams) -> Vec<String> {
    let mut comments = Vec::with_capacity(2);
    if !params.comment.is_empty() {
        comments.push(params.comment.clone());
    }

    let uri = params
        .source
        .canonicalize()
        .unwrap_or_else(|_| params.source.clone());
    let mut block = format!(
        "Thumb::Mimetype=image/jpeg\nThumb::URI=file://{}\n",
        uri.display()
    );
    if let Some(mtime) = source_mtime(&params.source) {
        block.push_str(&format!("Thumb::MTime={mtime}\n"));
    }
    block.push_str(&format!(
        "Thumb::Image::Width={}\nThumb::Image::Height={}",
        params.source_size.width, params.source_size.height
    ));
    comments.push(block);
    comments
}

/// Source modification time as seconds since the epoch, when available.
fn source_mtime(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}
