//! Per-channel value histograms.
//!
//! A [`Histogram`] counts, for each of red, green and blue, how many pixels
//! hold each value in a closed range `[min, max]`. Values outside the range are
//! ignored. It also finds per-channel peaks and renders a line plot.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::histogram::{Channel, Histogram};
//!
//! let img = PixelBuffer::filled(4, 4, [12, 200, 90]);
//! let hist = Histogram::compute(&img, 0, 255).unwrap();
//! assert_eq!(hist.count(Channel::Red, 12), 16);
//! assert_eq!(hist.peaks(), [12, 200, 90]);
//! ```

use pixlab_core::pixel::{Rgb, WHITE};
use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// Side of the square plot produced for the `histogram` command.
pub const PLOT_SIZE: u32 = 256;

/// Plot colors, in drawing order.
const LINE_COLORS: [Rgb; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Red channel.
    Red = 0,
    /// Green channel.
    Green = 1,
    /// Blue channel.
    Blue = 2,
}

impl Channel {
    /// All channels in RGB order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Value counts for the three channels over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [Vec<u64>; 3],
    min: u8,
    max: u8,
}

impl Histogram {
    /// Creates an empty histogram over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] unless `min < max`.
    pub fn new(min: u8, max: u8) -> OpsResult<Self> {
        if min >= max {
            return Err(OpsError::InvalidParameter(format!(
                "histogram range [{}, {}] is empty",
                min, max
            )));
        }
        let bins = (max - min) as usize + 1;
        Ok(Self {
            counts: [vec![0; bins], vec![0; bins], vec![0; bins]],
            min,
            max,
        })
    }

    /// Counts every pixel of `src` in one scan.
    pub fn compute(src: &PixelBuffer, min: u8, max: u8) -> OpsResult<Self> {
        trace!(width = src.width(), height = src.height(), min, max, "histogram::compute");
        let mut hist = Self::new(min, max)?;
        for chunk in src.data().chunks_exact(3) {
            hist.add([chunk[0], chunk[1], chunk[2]]);
        }
        Ok(hist)
    }

    /// Adds one pixel; channel values outside the range are skipped.
    #[inline]
    pub fn add(&mut self, px: Rgb) {
        for (c, &v) in px.iter().enumerate() {
            if (self.min..=self.max).contains(&v) {
                self.counts[c][(v - self.min) as usize] += 1;
            }
        }
    }

    /// Lowest counted value.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Highest counted value.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Number of bins per channel.
    pub fn len(&self) -> usize {
        self.counts[0].len()
    }

    /// Always `false`: the range holds at least two values.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Counts for one channel, index 0 is `min`.
    pub fn counts(&self, channel: Channel) -> &[u64] {
        &self.counts[channel.index()]
    }

    /// Count of `value` in `channel`; 0 outside the range.
    pub fn count(&self, channel: Channel, value: u8) -> u64 {
        if (self.min..=self.max).contains(&value) {
            self.counts[channel.index()][(value - self.min) as usize]
        } else {
            0
        }
    }

    /// Value with the highest count in `channel`.
    ///
    /// Ties go to the lowest value; an empty channel peaks at `min`.
    pub fn peak(&self, channel: Channel) -> u8 {
        let mut best = 0usize;
        let mut best_count = 0u64;
        for (i, &n) in self.counts[channel.index()].iter().enumerate() {
            if n > best_count {
                best = i;
                best_count = n;
            }
        }
        self.min + best as u8
    }

    /// Peaks of red, green and blue.
    pub fn peaks(&self) -> [u8; 3] {
        Channel::ALL.map(|c| self.peak(c))
    }

    /// Highest count across all channels.
    pub fn max_count(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|c| c.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Renders a line plot on a white canvas.
    ///
    /// Red is drawn first, then green, then blue, each as a 1-pixel polyline.
    /// Bin `i` maps to `x = i * width / (bins - 1)` and a count `n` to
    /// `y = height - n * height / max_count`. Points off the canvas are
    /// clipped.
    pub fn render(&self, width: u32, height: u32) -> PixelBuffer {
        trace!(width, height, "histogram::render");
        let mut canvas = PixelBuffer::filled(width, height, WHITE);
        let max_count = self.max_count().max(1);
        let last = (self.len() - 1) as u64;

        for (counts, color) in self.counts.iter().zip(LINE_COLORS) {
            let point = |i: usize| {
                let x = (i as u64 * width as u64 / last) as i64;
                let y = height as i64 - (counts[i] * height as u64 / max_count) as i64;
                (x, y)
            };
            for i in 1..counts.len() {
                let (x1, y1) = point(i - 1);
                let (x2, y2) = point(i);
                render_line(&mut canvas, x1, y1, x2, y2, color);
            }
        }
        debug!(max_count, "Rendered histogram plot");
        canvas
    }
}

/// Computes the `[0, 255]` histogram of `src` and renders the standard plot.
pub fn plot(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    Ok(Histogram::compute(src, 0, 255)?.render(PLOT_SIZE, PLOT_SIZE))
}

fn render_point(dst: &mut PixelBuffer, x: i64, y: i64, color: Rgb) {
    if x >= 0 && y >= 0 && x < dst.width() as i64 && y < dst.height() as i64 {
        dst.set_pixel(x as u32, y as u32, color);
    }
}

/// Draws a line with Bresenham's algorithm, clipping per point.
fn render_line(dst: &mut PixelBuffer, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgb) {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        render_point(dst, x, y, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
