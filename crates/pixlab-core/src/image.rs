//! Pixel buffer: the canonical image representation.
//!
//! A [`PixelBuffer`] is a rectangular grid of [`Rgb`] pixels stored row-major
//! with interleaved channels. The samples live behind an [`Arc`], so cloning a
//! buffer is cheap and hands out a shared snapshot. Operations never mutate a
//! published buffer; they build a new one, usually with [`PixelBuffer::from_fn`].
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//!
//! let img = PixelBuffer::from_fn(4, 2, |x, y| [x as u8 * 10, y as u8 * 10, 0]);
//! assert_eq!(img.dimensions(), (4, 2));
//! assert_eq!(img.pixel(3, 1), [30, 10, 0]);
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::pixel::{CHANNELS, Rgb};

/// Immutable-once-published RGB raster.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved samples, `width * height * 3` long
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a black buffer.
    ///
    /// ```rust
    /// use pixlab_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::new(3, 2);
    /// assert!(img.pixels().all(|(_, _, px)| px == [0, 0, 0]));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: Arc::new(vec![0; len]),
            width,
            height,
        }
    }

    /// Wraps existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height * 3`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Builds a buffer from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the rows are ragged.
    pub fn from_rows(rows: &[Vec<Rgb>]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for (y, row) in rows.iter().enumerate() {
            if row.len() as u32 != width {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!("row {} has {} pixels", y, row.len()),
                ));
            }
            for px in row {
                data.extend_from_slice(px);
            }
        }
        Self::from_data(width, height, data)
    }

    /// Creates a buffer filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgb) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates a buffer by evaluating `f(x, y)` for every pixel, row by row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its samples, cloning only if shared.
    pub fn into_data(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// Copies the samples first if this buffer shares them with another handle,
    /// so published snapshots are never modified.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgb) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Interleaved samples of row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    /// Iterates over `(x, y, pixel)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Returns a new buffer with `f` applied to every pixel.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Rgb) -> Rgb,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(CHANNELS) {
            data.extend_from_slice(&f([chunk[0], chunk[1], chunk[2]]));
        }
        Self {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }

    /// Returns `true` if both handles share the same sample storage.
    pub fn shares_data(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
