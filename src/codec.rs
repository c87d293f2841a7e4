//! Codec boundary: the trait the sizing pipeline drives, plus its errors.
//!
//! The pipeline never touches pixels itself. It asks a [`JpegCodec`] for the
//! source's dimensions and embedded metadata, computes the sizing, and hands
//! back one [`EncodeParams`] describing the whole output. The production
//! implementation is [`ImageCodec`](crate::image_codec::ImageCodec); tests
//! use a recording mock.

use crate::geometry::Dimensions;
use crate::markers::ThumbnailInfo;
use crate::params::EncodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a JPEG image: {0}")]
    NotAJpeg(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Everything `identify` learns about a source image in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub size: Dimensions,
    /// Free-form COM comment embedded in the source, if any.
    pub comment: Option<String>,
    /// `Thumb::` metadata embedded in the source, if any.
    pub thumbnail: Option<ThumbnailInfo>,
}

/// The two operations a backend must support.
///
/// `Sync` so a driver may run unrelated requests concurrently; the trait
/// itself carries no state between calls.
pub trait JpegCodec: Sync {
    /// Open the source and report its dimensions and embedded metadata.
    fn identify(&self, path: &Path) -> Result<SourceInfo, CodecError>;

    /// Decode at the given size, crop, and encode the output.
    fn encode(&self, params: &EncodeParams) -> Result<(), CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::geometry::CropRect;
    use std::sync::Mutex;

    /// Mock codec that records operations without touching pixels.
    /// Uses Mutex (not RefCell) so it stays Sync like real backends.
    #[derive(Default)]
    pub struct MockCodec {
        pub identify_results: Mutex<Vec<SourceInfo>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        pub fail_encode: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Encode {
            output: String,
            decode_size: Dimensions,
            crop: CropRect,
            quality: u32,
            comment: String,
        },
    }

    impl MockCodec {
        pub fn with_source(size: Dimensions) -> Self {
            Self::with_source_info(SourceInfo {
                size,
                comment: None,
                thumbnail: None,
            })
        }

        pub fn with_source_info(info: SourceInfo) -> Self {
            Self {
                identify_results: Mutex::new(vec![info]),
                operations: Mutex::new(Vec::new()),
                fail_encode: false,
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl JpegCodec for MockCodec {
        fn identify(&self, path: &Path) -> Result<SourceInfo, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| CodecError::NotAJpeg("no mock source".to_string()))
        }

        fn encode(&self, params: &EncodeParams) -> Result<(), CodecError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                output: params.output.to_string_lossy().to_string(),
                decode_size: params.decode_size,
                crop: params.crop,
                quality: params.quality.value(),
                comment: params.comment.clone(),
            });
            if self.fail_encode {
                return Err(CodecError::Encode("mock encode failure".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let codec = MockCodec::with_source(Dimensions::new(800, 600));

        let info = codec.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(info.size, Dimensions::new(800, 600));

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_fails_when_exhausted() {
        let codec = MockCodec::default();
        assert!(matches!(
            codec.identify(Path::new("/missing.jpg")),
            Err(CodecError::NotAJpeg(_))
        ));
    }

    #[test]
    fn mock_records_encode() {
        use crate::params::Quality;

        let codec = MockCodec::default();
        codec
            .encode(&EncodeParams {
                source: "/source.jpg".into(),
                output: "/thumb.jpg".into(),
                source_size: Dimensions::new(1000, 500),
                decode_size: Dimensions::new(200, 100),
                crop: CropRect::default(),
                quality: Quality::new(85),
                comment: "hi".to_string(),
            })
            .unwrap();

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                decode_size: Dimensions {
                    width: 200,
                    height: 100
                },
                quality: 85,
                ..
            }
        ));
    }
}
