//! Image filtering and convolution operations.
//!
//! # Kernels
//!
//! - [`Kernel::blur`] - 3x3 Gaussian-like blur, weights sum to 1
//! - [`Kernel::sharpen`] - 5x5 sharpen, weights sum to 1
//!
//! Sampling outside the image clamps to the nearest edge pixel. Each channel
//! sum is rounded to nearest and clamped to `[0, 255]`.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::filter::{convolve, Kernel};
//! use pixlab_ops::split::Split;
//!
//! let src = PixelBuffer::filled(16, 16, [128, 64, 32]);
//! let blurred = convolve(&src, &Kernel::blur(), Split::NONE);
//! assert_eq!(blurred.pixel(8, 8), [128, 64, 32]);
//! ```

use pixlab_core::PixelBuffer;
use pixlab_core::pixel::clamp_round;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{self, Split};
use crate::{OpsError, OpsResult};

/// Square convolution kernel with an odd side.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    data: Vec<f64>,
    /// Side length (odd).
    size: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `size` is even or zero, or
    /// `data` does not hold `size * size` weights.
    pub fn new(data: Vec<f64>, size: usize) -> OpsResult<Self> {
        if size % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel side must be odd".into(),
            ));
        }
        if data.len() != size * size {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                size,
                size
            )));
        }
        Ok(Self { data, size })
    }

    /// 3x3 blur kernel.
    ///
    /// ```rust
    /// use pixlab_ops::filter::Kernel;
    ///
    /// let k = Kernel::blur();
    /// assert_eq!(k.size(), 3);
    /// assert_eq!(k.weight(1, 1), 0.25);
    /// ```
    pub fn blur() -> Self {
        const E: f64 = 1.0 / 16.0;
        const S: f64 = 1.0 / 8.0;
        Self {
            data: vec![
                E, S, E,
                S, 0.25, S,
                E, S, E,
            ],
            size: 3,
        }
    }

    /// 5x5 sharpen kernel: outer ring -1/8, inner ring 1/4, center 1.
    pub fn sharpen() -> Self {
        const O: f64 = -0.125;
        const I: f64 = 0.25;
        Self {
            data: vec![
                O, O, O, O, O,
                O, I, I, I, O,
                O, I, 1.0, I, O,
                O, I, I, I, O,
                O, O, O, O, O,
            ],
            size: 5,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half the side length.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at column `kx`, row `ky`.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.data[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Applies a convolution kernel with edge clamping, composited through `split`.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel, split: Split) -> PixelBuffer {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel = kernel.size(),
        split = split.percent(),
        "convolve"
    );
    if src.is_empty() {
        return src.clone();
    }

    let max_x = src.width() as isize - 1;
    let max_y = src.height() as isize - 1;
    let r = kernel.radius() as isize;

    split::apply(src, split, |x, y, _| {
        let mut sums = [0.0f64; 3];
        for ky in 0..kernel.size() {
            for kx in 0..kernel.size() {
                // Source coordinates with edge clamping
                let sx = (x as isize + kx as isize - r).clamp(0, max_x) as u32;
                let sy = (y as isize + ky as isize - r).clamp(0, max_y) as u32;
                let w = kernel.weight(kx, ky);
                let px = src.pixel(sx, sy);
                for c in 0..3 {
                    sums[c] += px[c] as f64 * w;
                }
            }
        }
        sums.map(clamp_round)
    })
}

/// Blurs with [`Kernel::blur`].
pub fn blur(src: &PixelBuffer, split: Split) -> PixelBuffer {
    debug!(width = src.width(), height = src.height(), "Applying blur");
    convolve(src, &Kernel::blur(), split)
}

/// Sharpens with [`Kernel::sharpen`].
pub fn sharpen(src: &PixelBuffer, split: Split) -> PixelBuffer {
    debug!(width = src.width(), height = src.height(), "Applying sharpen");
    convolve(src, &Kernel::sharpen(), split)
}
