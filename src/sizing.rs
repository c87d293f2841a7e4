//! Pure sizing math: request normalization and the sizing policy engine.
//!
//! Everything here is pure and testable without any I/O or images. Integer
//! division truncates by contract — tests assert exact truncated results.

use crate::geometry::{CropRect, Dimensions, SizingResult};

/// Fallback edge length when a width or height was left unspecified.
pub const DEFAULT_EDGE: u32 = 64;

/// A requested width or height, as supplied by the caller.
///
/// An explicit tagged value rather than the historical encoding that
/// multiplexed "percent" onto the sign bit of an integer field, which was
/// ambiguous at zero and for negative inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSpec {
    /// No value given; resolves to [`DEFAULT_EDGE`].
    Unspecified,
    /// Absolute pixels, passed through unchanged.
    Absolute(u32),
    /// Percentage of the corresponding source axis. Values above 100 are
    /// accepted and upscale.
    Percent(u32),
}

impl SizeSpec {
    /// Resolve this spec against one source axis.
    ///
    /// Percentages use truncating division (`source * pct / 100`). No upper
    /// bound is enforced; requests larger than the source pass through.
    pub fn resolve(self, source_axis: u32) -> u32 {
        match self {
            SizeSpec::Unspecified => DEFAULT_EDGE,
            SizeSpec::Absolute(px) => px,
            SizeSpec::Percent(pct) => scale(source_axis, pct, 100),
        }
    }
}

/// Resolve both requested axes against the source dimensions.
///
/// # Examples
/// ```
/// # use thumbpress::sizing::{SizeSpec, resolve_targets};
/// # use thumbpress::geometry::Dimensions;
/// let source = Dimensions::new(1000, 500);
/// let (w, h) = resolve_targets(source, SizeSpec::Percent(25), SizeSpec::Unspecified);
/// assert_eq!((w, h), (250, 64));
/// ```
pub fn resolve_targets(source: Dimensions, width: SizeSpec, height: SizeSpec) -> (u32, u32) {
    (width.resolve(source.width), height.resolve(source.height))
}

/// `value * num / den` with truncation, widened to avoid intermediate
/// overflow. A degenerate (zero) denominator axis contributes 0 to the
/// derived axis; results past `u32::MAX` saturate, so the "no upper bound"
/// contract holds even for absurd percentages.
fn scale(value: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return 0;
    }
    u32::try_from(value as u64 * num as u64 / den as u64).unwrap_or(u32::MAX)
}

/// Split an overshoot into leading and trailing crop margins.
///
/// The leading edge takes the truncated half; the trailing edge absorbs the
/// rounding remainder. Saturates when there is no overshoot (the pinned or
/// degenerate axis), yielding zero margins.
fn split_overshoot(scaled: u32, target: u32) -> (u32, u32) {
    let overshoot = scaled.saturating_sub(target);
    let leading = overshoot / 2;
    (leading, overshoot - leading)
}

/// Compute the decode size and crop rectangle for one thumbnail request.
///
/// Three mutually exclusive, stateless policies, in priority order:
///
/// 1. **Max-dimension** — `max_dimension` present and positive. Ignores the
///    normalized targets. Pins one axis to the constraint and derives the
///    other from the source aspect ratio: with `outbound` false the larger
///    source axis is pinned (fit within a box), with `outbound` true the
///    smaller one is pinned, so the scaled image covers a
///    `max × max` square. With `outbound` and `crop_requested`, a centered
///    crop trims both axes back to the constraint.
/// 2. **Outbound cover** — no max-dimension, `outbound` true. Treats the
///    targets as a box to cover. Each axis is evaluated independently: if
///    pinning the opposite axis would overshoot the target, the overshoot is
///    adopted (and split into crop margins when requested).
/// 3. **Plain** — neither. The normalized targets are used as-is, no crop.
///
/// Pure, total, and idempotent: identical inputs give identical results,
/// and degenerate (zero-axis) sources produce a zero derived axis instead
/// of failing.
pub fn compute_sizing(
    source: Dimensions,
    target_width: u32,
    target_height: u32,
    max_dimension: Option<u32>,
    outbound: bool,
    crop_requested: bool,
) -> SizingResult {
    if let Some(max) = max_dimension.filter(|&m| m > 0) {
        return max_dimension_sizing(source, max, outbound, crop_requested);
    }
    if outbound {
        return outbound_sizing(source, target_width, target_height, crop_requested);
    }
    SizingResult {
        size: Dimensions::new(target_width, target_height),
        crop: CropRect::default(),
    }
}

fn max_dimension_sizing(
    source: Dimensions,
    max: u32,
    outbound: bool,
    crop_requested: bool,
) -> SizingResult {
    let w_gt_h = source.width > source.height;
    // XOR selects which axis gets pinned to `max`: plain mode pins the
    // larger source axis (fit), outbound flips it to the smaller one
    // (cover). Deliberate; do not simplify.
    let size = if w_gt_h ^ outbound {
        Dimensions::new(max, scale(max, source.height, source.width))
    } else {
        Dimensions::new(scale(max, source.width, source.height), max)
    };

    let mut crop = CropRect::default();
    if outbound && crop_requested {
        // Both axes go through the same formula; the pinned axis yields
        // algebraic zeros.
        (crop.top, crop.bottom) = split_overshoot(size.height, max);
        (crop.left, crop.right) = split_overshoot(size.width, max);
    }

    SizingResult { size, crop }
}

fn outbound_sizing(
    source: Dimensions,
    target_width: u32,
    target_height: u32,
    crop_requested: bool,
) -> SizingResult {
    // Width the image would have if the height were pinned, and vice versa.
    let scaled_w = scale(target_height, source.width, source.height);
    let scaled_h = scale(target_width, source.height, source.width);

    let mut size = Dimensions::new(target_width, target_height);
    let mut crop = CropRect::default();

    // Axes are evaluated independently: either, both, or neither may
    // overshoot. Extreme aspect ratios can overshoot on both at once; that
    // per-axis behavior is kept as-is.
    if scaled_w > target_width {
        if crop_requested {
            (crop.left, crop.right) = split_overshoot(scaled_w, target_width);
        }
        size.width = scaled_w;
    }
    if scaled_h > target_height {
        if crop_requested {
            (crop.top, crop.bottom) = split_overshoot(scaled_h, target_height);
        }
        size.height = scaled_h;
    }

    SizingResult { size, crop }
}
