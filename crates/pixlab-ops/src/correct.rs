//! Histogram-peak color correction.
//!
//! Finds the most common value of each channel inside the meaningful range
//! `[10, 245]` and shifts each channel so its peak lands on the average of the
//! three peaks. This removes a uniform color cast.

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::histogram::Histogram;
use crate::split::{self, Split};
use crate::OpsResult;

/// Lower bound of the analyzed and output range.
pub const CORRECT_MIN: u8 = 10;

/// Upper bound of the analyzed and output range.
pub const CORRECT_MAX: u8 = 245;

/// Per-channel offsets that align the histogram peaks of `src`.
pub fn peak_offsets(src: &PixelBuffer) -> OpsResult<[i32; 3]> {
    let peaks = Histogram::compute(src, CORRECT_MIN, CORRECT_MAX)?.peaks();
    let sum: i32 = peaks.iter().map(|&p| p as i32).sum();
    let average = (sum as f64 / 3.0).round() as i32;
    debug!(?peaks, average, "color correction peaks");
    Ok(peaks.map(|p| average - p as i32))
}

/// Color-corrects `src`, composited through `split`.
///
/// Every corrected channel is clamped to `[10, 245]`.
///
/// # Example
///
/// ```rust
/// use pixlab_core::PixelBuffer;
/// use pixlab_ops::correct::color_correct;
/// use pixlab_ops::split::Split;
///
/// // Peaks 100, 120, 140 average to 120
/// let img = PixelBuffer::filled(2, 2, [100, 120, 140]);
/// let out = color_correct(&img, Split::NONE).unwrap();
/// assert_eq!(out.pixel(0, 0), [120, 120, 120]);
/// ```
pub fn color_correct(src: &PixelBuffer, split: Split) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), split = split.percent(), "color_correct");
    let offsets = peak_offsets(src)?;
    let (lo, hi) = (CORRECT_MIN as i32, CORRECT_MAX as i32);
    Ok(split::apply(src, split, |_, _, px| {
        [0, 1, 2].map(|c| (px[c] as i32 + offsets[c]).clamp(lo, hi) as u8)
    }))
}
