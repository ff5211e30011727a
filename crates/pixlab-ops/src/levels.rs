//! Three-point levels adjustment.
//!
//! The shadow, mid and highlight points `b < m < w` define the quadratic
//! `f(v) = A v^2 + B v + C` passing through `(b, 0)`, `(m, 128)` and
//! `(w, 255)`. Every channel is mapped through it, rounded and clamped.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::levels::{adjust_levels, Levels};
//! use pixlab_ops::split::Split;
//!
//! let img = PixelBuffer::filled(1, 1, [20, 100, 230]);
//! let levels = Levels::new(20, 100, 230).unwrap();
//! let out = adjust_levels(&img, levels, Split::NONE);
//! assert_eq!(out.pixel(0, 0), [0, 128, 255]);
//! ```

use pixlab_core::pixel::clamp_round;
use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{self, Split};
use crate::{OpsError, OpsResult};

/// Validated shadow, mid and highlight points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    black: u8,
    mid: u8,
    white: u8,
}

impl Levels {
    /// Validates `black < mid < white`, all in `[0, 255]`.
    pub fn new(black: i64, mid: i64, white: i64) -> OpsResult<Self> {
        let in_range = |v: i64| (0..=255).contains(&v);
        if !(in_range(black) && in_range(mid) && in_range(white) && black < mid && mid < white) {
            return Err(OpsError::InvalidParameter(format!(
                "invalid shadow, mid, highlight points: {} {} {}",
                black, mid, white
            )));
        }
        Ok(Self {
            black: black as u8,
            mid: mid as u8,
            white: white as u8,
        })
    }

    /// Shadow point, mapped to 0.
    pub fn black(self) -> u8 {
        self.black
    }

    /// Mid point, mapped to 128.
    pub fn mid(self) -> u8 {
        self.mid
    }

    /// Highlight point, mapped to 255.
    pub fn white(self) -> u8 {
        self.white
    }

    /// Solves the tone curve for these points.
    pub fn curve(self) -> ToneCurve {
        let (b, m, w) = (self.black as f64, self.mid as f64, self.white as f64);
        let det = b * b * (m - w) - b * (m * m - w * w) + m * m * w - m * w * w;
        let a = -b * (128.0 - 255.0) + 128.0 * w - 255.0 * m;
        let bb = b * b * (128.0 - 255.0) + 255.0 * m * m - 128.0 * w * w;
        let c = b * b * (255.0 * m - 128.0 * w) - b * (255.0 * m * m - 128.0 * w * w);
        ToneCurve {
            a: a / det,
            b: bb / det,
            c: c / det,
        }
    }
}

/// Quadratic `a v^2 + b v + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    /// Quadratic coefficient.
    pub a: f64,
    /// Linear coefficient.
    pub b: f64,
    /// Constant term.
    pub c: f64,
}

impl ToneCurve {
    /// Evaluates the curve, unrounded.
    #[inline]
    pub fn eval(&self, v: f64) -> f64 {
        self.a * v * v + self.b * v + self.c
    }

    /// Lookup table over every channel value.
    pub fn table(&self) -> [u8; 256] {
        std::array::from_fn(|v| clamp_round(self.eval(v as f64)))
    }
}

/// Applies the levels curve to every channel, composited through `split`.
pub fn adjust_levels(src: &PixelBuffer, levels: Levels, split: Split) -> PixelBuffer {
    trace!(
        width = src.width(),
        height = src.height(),
        black = levels.black,
        mid = levels.mid,
        white = levels.white,
        split = split.percent(),
        "adjust_levels"
    );
    let curve = levels.curve();
    debug!(a = curve.a, b = curve.b, c = curve.c, "levels curve");
    let lut = curve.table();
    split::apply(src, split, |_, _, px| px.map(|v| lut[v as usize]))
}
