//! Geometric transformations.
//!
//! - [`flip_h`] - left-right mirror
//! - [`flip_v`] - top-bottom mirror
//!
//! Both are involutions: applying one twice returns the source.

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::trace;

/// Flips image horizontally (left-right mirror).
///
/// # Example
///
/// ```rust
/// use pixlab_core::PixelBuffer;
/// use pixlab_ops::transform::flip_h;
///
/// let src = PixelBuffer::from_rows(&[vec![[255, 0, 0], [0, 255, 0]]]).unwrap();
/// let flipped = flip_h(&src);
/// assert_eq!(flipped.pixel(0, 0), [0, 255, 0]); // Was right, now left
/// assert_eq!(flipped.pixel(1, 0), [255, 0, 0]);
/// ```
pub fn flip_h(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "flip_h");
    let last = src.width().saturating_sub(1);
    PixelBuffer::from_fn(src.width(), src.height(), |x, y| src.pixel(last - x, y))
}

/// Flips image vertically (top-bottom mirror).
///
/// # Example
///
/// ```rust
/// use pixlab_core::PixelBuffer;
/// use pixlab_ops::transform::flip_v;
///
/// let src = PixelBuffer::from_rows(&[vec![[1, 1, 1]], vec![[2, 2, 2]]]).unwrap();
/// let flipped = flip_v(&src);
/// assert_eq!(flipped.pixel(0, 0), [2, 2, 2]); // Was bottom, now top
/// ```
pub fn flip_v(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "flip_v");
    let last = src.height().saturating_sub(1);
    PixelBuffer::from_fn(src.width(), src.height(), |x, y| src.pixel(x, last - y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_rows(&[
            vec![[255, 0, 0], [0, 255, 0]],
            vec![[0, 0, 255], [255, 255, 255]],
        ])
        .unwrap()
    }

    #[test]
    fn test_flip_v_swaps_rows() {
        let flipped = flip_v(&sample());
        let expected = PixelBuffer::from_rows(&[
            vec![[0, 0, 255], [255, 255, 255]],
            vec![[255, 0, 0], [0, 255, 0]],
        ])
        .unwrap();
        assert_eq!(flipped, expected);
    }

    #[test]
    fn test_flip_h_mirrors_columns() {
        let flipped = flip_h(&sample());
        assert_eq!(flipped.pixel(0, 0), [0, 255, 0]);
        assert_eq!(flipped.pixel(1, 1), [0, 0, 255]);
    }

    #[test]
    fn test_involution() {
        let img = PixelBuffer::from_fn(5, 3, |x, y| [x as u8 * 40, y as u8 * 60, (x + y) as u8]);
        assert_eq!(flip_h(&flip_h(&img)), img);
        assert_eq!(flip_v(&flip_v(&img)), img);
    }

    #[test]
    fn test_empty() {
        let img = PixelBuffer::new(0, 0);
        assert!(flip_h(&img).is_empty());
        assert!(flip_v(&img).is_empty());
    }
}
