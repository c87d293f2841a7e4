//! # thumbpress
//!
//! One-shot JPEG thumbnailer: give it a source image and a handful of size
//! constraints, get back a thumbnail with the right fit/cover/crop geometry
//! and the source's provenance embedded as JPEG comments.
//!
//! # Architecture
//!
//! The algorithmic heart is a pure sizing core; pixels are someone else's
//! problem, behind a trait:
//!
//! ```text
//! identify ──▶ resolve SizeSpecs ──▶ compute_sizing ──▶ encode
//! (codec)      (normalizer)          (policy engine)    (codec)
//! ```
//!
//! The sizing core is total and infallible: zero sizes default, percentages
//! resolve against the source, out-of-range quality resets. Only the codec
//! boundary can fail, and each failure terminates the request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizing`] | Request normalizer + the three sizing policies (pure math) |
//! | [`geometry`] | `Dimensions`, `CropRect`, `SizingResult` value types |
//! | [`params`] | `Quality` and the `EncodeParams` handed to a codec |
//! | [`codec`] | The `JpegCodec` trait and its error taxonomy |
//! | [`image_codec`] | Production codec over the `image` crate |
//! | [`markers`] | COM-segment reading/writing (comments, `Thumb::` metadata) |
//! | [`pipeline`] | Drives one request end to end; returns a report |
//!
//! # Sizing policies
//!
//! - **Plain**: the normalized width/height, as-is.
//! - **Max-dimension**: one scalar bounds the larger source axis (or, under
//!   `--outbound`, the smaller one), the other axis keeps the aspect ratio.
//! - **Outbound (cover)**: the requested box is covered on every axis; with
//!   `--crop` the overshoot is trimmed symmetrically back to the box.
//!
//! All derived dimensions use truncating integer division, by contract.

pub mod codec;
pub mod geometry;
pub mod image_codec;
pub mod markers;
pub mod params;
pub mod pipeline;
pub mod sizing;

pub use codec::{CodecError, JpegCodec, SourceInfo};
pub use geometry::{CropRect, Dimensions, SizingResult};
pub use image_codec::ImageCodec;
pub use markers::ThumbnailInfo;
pub use params::{EncodeParams, Quality};
pub use pipeline::{PipelineError, ThumbReport, ThumbRequest, run};
pub use sizing::{DEFAULT_EDGE, SizeSpec, compute_sizing, resolve_targets};
