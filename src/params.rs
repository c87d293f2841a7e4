//! Parameter types for the codec boundary.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`pipeline`](crate::pipeline) (which decides the
//! sizing) and the [`codec`](crate::codec) (which does the pixel work), so
//! backends can be swapped — e.g. for a recording mock in tests — without
//! touching the sizing logic.

use crate::geometry::{CropRect, Dimensions};
use std::path::PathBuf;

/// JPEG encoding quality (1-100).
///
/// Out-of-range input silently resets to the default of 85 — the historical
/// CLI contract — rather than clamping to the nearest bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub const DEFAULT: u32 = 85;

    pub fn new(value: u32) -> Self {
        if (1..=100).contains(&value) {
            Self(value)
        } else {
            Self(Self::DEFAULT)
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Full specification for one encode: where to read, where to write, the
/// decode size and crop from the sizing engine, and the output metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Original source dimensions, recorded in the output's `Thumb::` block.
    pub source_size: Dimensions,
    /// Size to decode/scale the source to, before cropping.
    pub decode_size: Dimensions,
    /// Margins to remove from the scaled image.
    pub crop: CropRect,
    pub quality: Quality,
    /// Free-form comment embedded in the output. Empty writes no comment.
    pub comment: String,
}
