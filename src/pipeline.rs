//! One thumbnail request, end to end.
//!
//! Combines the pure sizing core with a codec backend: identify the source,
//! resolve the requested sizes, compute the sizing policy, and hand the
//! codec one encode description. All configuration travels in an immutable
//! [`ThumbRequest`]; nothing is kept between requests, so a driver may run
//! unrelated requests concurrently.

use crate::codec::{CodecError, JpegCodec, SourceInfo};
use crate::geometry::SizingResult;
use crate::params::{EncodeParams, Quality};
use crate::sizing::{SizeSpec, compute_sizing, resolve_targets};
use std::path::PathBuf;
use thiserror::Error;

/// Everything the driver resolved for one thumbnail request.
#[derive(Debug, Clone)]
pub struct ThumbRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: SizeSpec,
    pub height: SizeSpec,
    /// Overrides `width`/`height` when present and positive.
    pub max_dimension: Option<u32>,
    pub outbound: bool,
    pub crop: bool,
    pub quality: Quality,
    pub comment: String,
}

/// Request failures, split by stage so the driver can exit distinctly.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: CodecError,
    },
    #[error("cannot write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: CodecError,
    },
}

/// What one request computed — returned so the driver can report it.
#[derive(Debug, Clone)]
pub struct ThumbReport {
    pub source: SourceInfo,
    /// Normalized pixel targets after `SizeSpec` resolution.
    pub target_width: u32,
    pub target_height: u32,
    pub sizing: SizingResult,
}

/// Run a single request against a codec.
pub fn run(codec: &impl JpegCodec, request: &ThumbRequest) -> Result<ThumbReport, PipelineError> {
    let source = codec.identify(&request.input).map_err(|e| PipelineError::Open {
        path: request.input.clone(),
        source: e,
    })?;

    let (target_width, target_height) = resolve_targets(source.size, request.width, request.height);
    let sizing = compute_sizing(
        source.size,
        target_width,
        target_height,
        request.max_dimension,
        request.outbound,
        request.crop,
    );

    codec
        .encode(&EncodeParams {
            source: request.input.clone(),
            output: request.output.clone(),
            source_size: source.size,
            decode_size: sizing.size,
            crop: sizing.crop,
            quality: request.quality,
            comment: request.comment.clone(),
        })
        .map_err(|e| PipelineError::Encode {
            path: request.output.clone(),
            source: e,
        })?;

    Ok(ThumbReport {
        source,
        target_width,
        target_height,
        sizing,
    })
}
