//! Value types shared between the sizing core and the codec boundary.
//!
//! Everything here is plain `Copy` data, created once per thumbnail request
//! and discarded when the request completes.

/// Pixel dimensions of a source image or a computed thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pixels to remove from each edge of the *scaled* (pre-crop) image.
///
/// When cropping is active, `top + bottom + final_height == scaled_height`
/// and `left + right + final_width == scaled_width`. When inactive, all
/// four margins are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CropRect {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl CropRect {
    /// True when no pixels would be removed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Dimensions remaining after applying this crop to a scaled image.
    pub fn applied_to(&self, scaled: Dimensions) -> Dimensions {
        Dimensions {
            width: scaled.width - self.left - self.right,
            height: scaled.height - self.top - self.bottom,
        }
    }
}

/// Final decode size and crop rectangle for one thumbnail request.
///
/// `size` is the dimensions the codec should decode/scale to; `crop` is then
/// applied to that scaled image. Constructed by
/// [`compute_sizing`](crate::sizing::compute_sizing), consumed by the codec
/// stage, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingResult {
    pub size: Dimensions,
    pub crop: CropRect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_crop_is_empty() {
        assert!(CropRect::default().is_empty());
    }

    #[test]
    fn nonzero_crop_is_not_empty() {
        let crop = CropRect {
            left: 1,
            ..CropRect::default()
        };
        assert!(!crop.is_empty());
    }

    #[test]
    fn applied_to_subtracts_margins() {
        let crop = CropRect {
            top: 10,
            bottom: 11,
            left: 20,
            right: 21,
        };
        let out = crop.applied_to(Dimensions::new(400, 300));
        assert_eq!(out, Dimensions::new(359, 279));
    }

    #[test]
    fn empty_crop_preserves_dimensions() {
        let dims = Dimensions::new(123, 456);
        assert_eq!(CropRect::default().applied_to(dims), dims);
    }
}
