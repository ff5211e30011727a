//! Haar wavelet compression.
//!
//! Lossy compression by discarding small wavelet coefficients:
//!
//! 1. Split the image into three `f64` planes.
//! 2. Zero-pad each plane to a power-of-two square (skipped at 0%).
//! 3. Run one separable Haar level: every row, then every column.
//! 4. Zero every coefficient whose magnitude is at or below the threshold
//!    picked at `percent` through the sorted distinct magnitudes.
//! 5. Invert (columns, then rows), crop back, round and clamp.
//!
//! At 0% the transform round-trips, so the output matches the input up to
//! floating point rounding. At 100% every coefficient is discarded.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::wavelet::compress;
//!
//! let img = PixelBuffer::from_fn(5, 3, |x, y| [x as u8 * 40, y as u8 * 70, 9]);
//! assert_eq!(compress(&img, 0.0).unwrap(), img);
//! assert!(compress(&img, 100.0).unwrap().pixels().all(|(_, _, px)| px == [0, 0, 0]));
//! ```

use std::f64::consts::SQRT_2;

use pixlab_core::pixel::clamp_round;
use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// One channel of an image as floating point samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Plane {
    /// Extracts channel `c` of `src`.
    pub fn from_channel(src: &PixelBuffer, c: usize) -> Self {
        Self {
            data: src.data().iter().skip(c).step_by(3).map(|&v| v as f64).collect(),
            width: src.width() as usize,
            height: src.height() as usize,
        }
    }

    /// Width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(x, y)`, 0 outside the plane.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            0.0
        }
    }

    /// Returns a `side x side` copy with zeros appended after the data.
    pub fn padded(&self, side: usize) -> Self {
        let mut data = vec![0.0; side * side];
        for y in 0..self.height.min(side) {
            for x in 0..self.width.min(side) {
                data[y * side + x] = self.data[y * self.width + x];
            }
        }
        Self {
            data,
            width: side,
            height: side,
        }
    }

    /// One Haar level: all rows, then all columns.
    pub fn forward(&mut self) {
        self.for_each_row(haar_forward);
        self.for_each_column(haar_forward);
    }

    /// Inverse of [`forward`](Self::forward): all columns, then all rows.
    pub fn inverse(&mut self) {
        self.for_each_column(haar_inverse);
        self.for_each_row(haar_inverse);
    }

    fn for_each_row(&mut self, f: fn(&mut [f64], &mut Vec<f64>)) {
        let mut scratch = Vec::with_capacity(self.width);
        for row in self.data.chunks_exact_mut(self.width.max(1)) {
            f(row, &mut scratch);
        }
    }

    fn for_each_column(&mut self, f: fn(&mut [f64], &mut Vec<f64>)) {
        let mut column = vec![0.0; self.height];
        let mut scratch = Vec::with_capacity(self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                column[y] = self.data[y * self.width + x];
            }
            f(&mut column, &mut scratch);
            for y in 0..self.height {
                self.data[y * self.width + x] = column[y];
            }
        }
    }

    fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Zeroes every sample with `|v| <= threshold`.
    pub fn threshold(&mut self, threshold: f64) {
        for v in &mut self.data {
            if v.abs() <= threshold {
                *v = 0.0;
            }
        }
    }
}

/// Forward 1D Haar step in place.
///
/// Pair averages `(a + b) / sqrt2` go to the first half, pair differences
/// `(a - b) / sqrt2` to the second. An unpaired last sample is kept as is.
pub fn haar_forward(s: &mut [f64], scratch: &mut Vec<f64>) {
    let n = s.len();
    let mid = n / 2;
    scratch.clear();
    scratch.extend_from_slice(s);
    for i in 0..mid {
        let (a, b) = (scratch[2 * i], scratch[2 * i + 1]);
        s[i] = (a + b) / SQRT_2;
        s[mid + i] = (a - b) / SQRT_2;
    }
}

/// Inverse of [`haar_forward`] in place.
pub fn haar_inverse(s: &mut [f64], scratch: &mut Vec<f64>) {
    let n = s.len();
    let mid = n / 2;
    scratch.clear();
    scratch.extend_from_slice(s);
    for i in 0..mid {
        let (a, d) = (scratch[i], scratch[mid + i]);
        s[2 * i] = (a + d) / SQRT_2;
        s[2 * i + 1] = (a - d) / SQRT_2;
    }
}

/// Magnitude at `percent` through the sorted distinct magnitudes of `planes`.
pub fn threshold_for(planes: &[Plane], percent: f64) -> f64 {
    let mut mags: Vec<f64> = planes
        .iter()
        .flat_map(|p| p.coefficients())
        .map(f64::abs)
        .collect();
    mags.sort_unstable_by(f64::total_cmp);
    mags.dedup();
    if mags.is_empty() {
        return 0.0;
    }
    let idx = ((percent * mags.len() as f64 / 100.0).round() as usize).min(mags.len() - 1);
    trace!(distinct = mags.len(), idx, "threshold_for");
    mags[idx]
}

/// Compresses `src` by discarding `percent` of its wavelet magnitudes.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] unless `0 <= percent <= 100`.
pub fn compress(src: &PixelBuffer, percent: f64) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), percent, "compress");
    if !(0.0..=100.0).contains(&percent) {
        return Err(OpsError::InvalidParameter(format!(
            "compression percentage should be between 0 and 100, got {}",
            percent
        )));
    }
    if src.is_empty() {
        return Ok(src.clone());
    }

    let lossy = percent > 0.0;
    let side = (src.width().max(src.height()) as usize).next_power_of_two();
    let mut planes: [Plane; 3] = std::array::from_fn(|c| {
        let plane = Plane::from_channel(src, c);
        if lossy { plane.padded(side) } else { plane }
    });

    for plane in &mut planes {
        plane.forward();
    }
    if lossy {
        let threshold = threshold_for(&planes, percent);
        debug!(threshold, side, "Discarding small coefficients");
        for plane in &mut planes {
            plane.threshold(threshold);
        }
    }
    for plane in &mut planes {
        plane.inverse();
    }

    Ok(PixelBuffer::from_fn(src.width(), src.height(), |x, y| {
        let (x, y) = (x as usize, y as usize);
        planes.each_ref().map(|p| clamp_round(p.get(x, y)))
    }))
}
