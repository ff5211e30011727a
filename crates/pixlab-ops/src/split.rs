//! Split-preview compositing.
//!
//! A split filter applies its transform to the columns left of (and including)
//! a split column and copies the source pixel everywhere else, so before and
//! after can be compared side by side. Every split-capable operation in this
//! crate goes through [`apply`].
//!
//! The split column is `floor(width * percent / 100)`; column `x` is
//! transformed when `percent == 0` or `x <= column`.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::split::{apply, Split};
//!
//! let src = PixelBuffer::filled(10, 1, [0, 0, 0]);
//! let out = apply(&src, Split::new(50).unwrap(), |_, _, _| [255, 255, 255]);
//! assert_eq!(out.pixel(5, 0), [255, 255, 255]);
//! assert_eq!(out.pixel(6, 0), [0, 0, 0]);
//! ```

use pixlab_core::{PixelBuffer, Rgb};

use crate::{OpsError, OpsResult};

/// Validated split percentage in `[0, 100]`.
///
/// `0` means "no split": the whole image is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Split(u32);

impl Split {
    /// Transform the whole image.
    pub const NONE: Split = Split(0);

    /// Validates a split percentage.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] outside `[0, 100]`.
    pub fn new(percent: i64) -> OpsResult<Self> {
        if !(0..=100).contains(&percent) {
            return Err(OpsError::InvalidParameter(format!(
                "split percentage should be between 0 and 100, got {}",
                percent
            )));
        }
        Ok(Self(percent as u32))
    }

    /// The percentage value.
    #[inline]
    pub fn percent(self) -> u32 {
        self.0
    }

    /// Last transformed column for an image `width` pixels wide.
    #[inline]
    pub fn column(self, width: u32) -> u64 {
        width as u64 * self.0 as u64 / 100
    }

    /// Whether column `x` takes the transformed value.
    #[inline]
    pub fn covers(self, x: u32, width: u32) -> bool {
        self.0 == 0 || x as u64 <= self.column(width)
    }
}

/// Builds a new buffer taking `f(x, y, pixel)` for covered columns and the
/// source pixel for the rest. `f` is not called for uncovered columns.
pub fn apply<F>(src: &PixelBuffer, split: Split, mut f: F) -> PixelBuffer
where
    F: FnMut(u32, u32, Rgb) -> Rgb,
{
    let width = src.width();
    PixelBuffer::from_fn(width, src.height(), |x, y| {
        let px = src.pixel(x, y);
        if split.covers(x, width) { f(x, y, px) } else { px }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(Split::new(0).is_ok());
        assert!(Split::new(100).is_ok());
        assert!(matches!(Split::new(-1), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(Split::new(101), Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_column() {
        assert_eq!(Split::new(50).unwrap().column(10), 5);
        assert_eq!(Split::new(33).unwrap().column(10), 3);
        assert_eq!(Split::new(100).unwrap().column(7), 7);
    }

    #[test]
    fn test_covers_inclusive() {
        let s = Split::new(50).unwrap();
        assert!(s.covers(0, 10));
        assert!(s.covers(5, 10));
        assert!(!s.covers(6, 10));
        assert!(Split::NONE.covers(9, 10));
    }

    #[test]
    fn test_small_percent_still_covers_first_column() {
        let s = Split::new(1).unwrap();
        assert_eq!(s.column(10), 0);
        assert!(s.covers(0, 10));
        assert!(!s.covers(1, 10));
    }

    #[test]
    fn test_apply_skips_uncovered() {
        let src = PixelBuffer::filled(4, 2, [10, 20, 30]);
        let mut calls = 0;
        let out = apply(&src, Split::new(25).unwrap(), |_, _, _| {
            calls += 1;
            [0, 0, 0]
        });
        assert_eq!(calls, 2 * 2);
        assert_eq!(out.pixel(1, 1), [0, 0, 0]);
        assert_eq!(out.pixel(2, 1), [10, 20, 30]);
    }
}
