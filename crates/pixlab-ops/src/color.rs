//! Per-pixel color transforms.
//!
//! Brightness, component extraction, the sepia and grayscale matrices and
//! splitting/recombining the RGB channels. All transforms except
//! [`brighten`] and the split/combine pair composite through
//! [`Split`](crate::split::Split).

use std::fmt;
use std::str::FromStr;

use pixlab_core::pixel::{clamp_i32, clamp_round, clamp_trunc, luma};
use pixlab_core::{PixelBuffer, Rgb};
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

use crate::split::{self, Split};
use crate::OpsError;

/// Sepia tone matrix, rows produce r', g', b'.
pub const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Adds `delta` to every channel, clamping to `[0, 255]`.
///
/// # Example
///
/// ```rust
/// use pixlab_core::PixelBuffer;
/// use pixlab_ops::color::brighten;
///
/// let img = PixelBuffer::filled(1, 1, [250, 10, 0]);
/// assert_eq!(brighten(&img, 10).pixel(0, 0), [255, 20, 10]);
/// assert_eq!(brighten(&img, -20).pixel(0, 0), [230, 0, 0]);
/// ```
pub fn brighten(src: &PixelBuffer, delta: i32) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), delta, "brighten");
    src.map(|px| px.map(|v| clamp_i32(v as i32 + delta)))
}

/// Single-channel view of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Keep red, zero the others.
    Red,
    /// Keep green, zero the others.
    Green,
    /// Keep blue, zero the others.
    Blue,
    /// `max(r, g, b)` in every channel.
    Value,
    /// Rounded mean of the channels in every channel.
    Intensity,
    /// Rounded Rec.709 luma in every channel.
    Luma,
}

impl Component {
    /// All components, in command order.
    pub const ALL: [Component; 6] = [
        Component::Red,
        Component::Green,
        Component::Blue,
        Component::Value,
        Component::Intensity,
        Component::Luma,
    ];

    /// Lowercase name, as used in commands.
    pub fn name(self) -> &'static str {
        match self {
            Component::Red => "red",
            Component::Green => "green",
            Component::Blue => "blue",
            Component::Value => "value",
            Component::Intensity => "intensity",
            Component::Luma => "luma",
        }
    }

    /// Applies the extraction to one pixel.
    #[inline]
    pub fn extract(self, [r, g, b]: Rgb) -> Rgb {
        match self {
            Component::Red => [r, 0, 0],
            Component::Green => [0, g, 0],
            Component::Blue => [0, 0, b],
            Component::Value => [r.max(g).max(b); 3],
            Component::Intensity => {
                [clamp_round((r as f64 + g as f64 + b as f64) / 3.0); 3]
            }
            Component::Luma => [clamp_round(luma([r, g, b])); 3],
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Component::Red),
            "green" => Ok(Component::Green),
            "blue" => Ok(Component::Blue),
            "value" => Ok(Component::Value),
            "intensity" => Ok(Component::Intensity),
            "luma" => Ok(Component::Luma),
            _ => Err(OpsError::InvalidParameter(format!(
                "unknown component: {}",
                s
            ))),
        }
    }
}

/// Extracts a [`Component`], composited through `split`.
///
/// # Example
///
/// ```rust
/// use pixlab_core::PixelBuffer;
/// use pixlab_ops::color::{extract_component, Component};
/// use pixlab_ops::split::Split;
///
/// let img = PixelBuffer::filled(1, 1, [10, 200, 30]);
/// let v = extract_component(&img, Component::Value, Split::NONE);
/// assert_eq!(v.pixel(0, 0), [200, 200, 200]);
/// ```
pub fn extract_component(src: &PixelBuffer, which: Component, split: Split) -> PixelBuffer {
    trace!(
        width = src.width(),
        height = src.height(),
        component = %which,
        split = split.percent(),
        "extract_component"
    );
    split::apply(src, split, |_, _, px| which.extract(px))
}

/// Applies the [`SEPIA`] matrix. Results are truncated, not rounded.
pub fn sepia(src: &PixelBuffer, split: Split) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), split = split.percent(), "sepia");
    split::apply(src, split, |_, _, [r, g, b]| {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        SEPIA.map(|m| clamp_trunc(m[0] * r + m[1] * g + m[2] * b))
    })
}

/// Replaces every channel with the rounded Rec.709 luma.
pub fn grayscale(src: &PixelBuffer, split: Split) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), split = split.percent(), "grayscale");
    split::apply(src, split, |_, _, px| [clamp_round(luma(px)); 3])
}

/// Splits into three buffers isolating red, green and blue.
pub fn rgb_split(src: &PixelBuffer) -> (PixelBuffer, PixelBuffer, PixelBuffer) {
    trace!(width = src.width(), height = src.height(), "rgb_split");
    (
        src.map(|px| Component::Red.extract(px)),
        src.map(|px| Component::Green.extract(px)),
        src.map(|px| Component::Blue.extract(px)),
    )
}

/// Outcome of [`rgb_combine`].
#[derive(Debug)]
pub struct Combined {
    /// Recombined image, sized like the red operand.
    pub image: PixelBuffer,
    /// Set when the operands disagree in size.
    pub mismatch: Option<OpsError>,
}

/// Rebuilds an image from the red channel of `red`, green of `green` and blue
/// of `blue`.
///
/// The result takes the red operand's dimensions. Mismatched operands are
/// reported through [`Combined::mismatch`] rather than rejected; samples a
/// smaller operand lacks read as 0.
pub fn rgb_combine(red: &PixelBuffer, green: &PixelBuffer, blue: &PixelBuffer) -> Combined {
    trace!(width = red.width(), height = red.height(), "rgb_combine");

    let dims = red.dimensions();
    let mismatch = [("green", green), ("blue", blue)]
        .into_iter()
        .find(|(_, b)| b.dimensions() != dims)
        .map(|(label, b)| {
            let (w, h) = b.dimensions();
            OpsError::SizeMismatch(format!(
                "red is {}x{} but {} is {}x{}",
                dims.0, dims.1, label, w, h
            ))
        });
    if let Some(err) = &mismatch {
        warn!(error = %err, "combining buffers of different sizes");
    }

    let image = PixelBuffer::from_fn(dims.0, dims.1, |x, y| {
        let g = green.get_pixel(x, y).map_or(0, |px| px[1]);
        let b = blue.get_pixel(x, y).map_or(0, |px| px[2]);
        [red.pixel(x, y)[0], g, b]
    });
    Combined { image, mismatch }
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
    fn test_brighten_example() {
        let out = brighten(&sample(), 50);
        let expected = PixelBuffer::from_rows(&[
            vec![[255, 50, 50], [50, 255, 50]],
            vec![[50, 50, 255], [255, 255, 255]],
        ])
        .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_component_parse() {
        assert_eq!("Luma".parse::<Component>().unwrap(), Component::Luma);
        assert_eq!("intensity".parse::<Component>().unwrap(), Component::Intensity);
        assert!("alpha".parse::<Component>().is_err());
        for c in Component::ALL {
            assert_eq!(c.name().parse::<Component>().unwrap(), c);
        }
    }

    #[test]
    fn test_component_values() {
        let px = [100, 50, 201];
        assert_eq!(Component::Red.extract(px), [100, 0, 0]);
        assert_eq!(Component::Green.extract(px), [0, 50, 0]);
        assert_eq!(Component::Blue.extract(px), [0, 0, 201]);
        assert_eq!(Component::Value.extract(px), [201; 3]);
        // 351 / 3 = 117
        assert_eq!(Component::Intensity.extract(px), [117; 3]);
        // 1 + 1 + 0 = 2 / 3 = 0.67 -> 1
        assert_eq!(Component::Intensity.extract([1, 1, 0]), [1; 3]);
        // 21.26 + 35.76 + 14.5122 = 71.53
        assert_eq!(Component::Luma.extract(px), [72; 3]);
    }

    #[test]
    fn test_grayscale_white_and_red() {
        let out = grayscale(&sample(), Split::NONE);
        assert_eq!(out.pixel(0, 0), [54, 54, 54]);
        assert_eq!(out.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn test_sepia_truncates() {
        let img = PixelBuffer::filled(1, 1, [100, 100, 100]);
        let out = sepia(&img, Split::NONE);
        // 135.1, 120.3, 93.7
        assert_eq!(out.pixel(0, 0), [135, 120, 93]);
        let out = sepia(&PixelBuffer::filled(1, 1, [255, 255, 255]), Split::NONE);
        assert_eq!(out.pixel(0, 0), [255, 255, 238]);
    }

    #[test]
    fn test_split_sepia() {
        let img = PixelBuffer::filled(4, 1, [100, 120, 140]);
        let out = sepia(&img, Split::new(25).unwrap());
        // 158.04, 140.74, 109.62
        assert_eq!(out.pixel(0, 0), [158, 140, 109]);
        assert_eq!(out.pixel(1, 0), [158, 140, 109]);
        assert_eq!(out.pixel(2, 0), [100, 120, 140]);
        assert_eq!(out.pixel(3, 0), [100, 120, 140]);
    }

    #[test]
    fn test_split_grayscale() {
        // 60% of 5 puts the split at column 3.
        let img = PixelBuffer::filled(5, 1, [100, 120, 140]);
        let out = grayscale(&img, Split::new(60).unwrap());
        for x in 0..=3 {
            // 117.192
            assert_eq!(out.pixel(x, 0), [117, 117, 117], "x={}", x);
        }
        assert_eq!(out.pixel(4, 0), [100, 120, 140]);
    }

    #[test]
    fn test_split_component() {
        let img = PixelBuffer::filled(4, 1, [10, 20, 30]);
        let out = extract_component(&img, Component::Red, Split::new(25).unwrap());
        assert_eq!(out.pixel(1, 0), [10, 0, 0]);
        assert_eq!(out.pixel(2, 0), [10, 20, 30]);
    }

    #[test]
    fn test_split_then_combine_roundtrip() {
        let img = PixelBuffer::from_fn(5, 4, |x, y| [x as u8 * 50, y as u8 * 60, 255 - x as u8]);
        let (r, g, b) = rgb_split(&img);
        let combined = rgb_combine(&r, &g, &b);
        assert!(combined.mismatch.is_none());
        assert_eq!(combined.image, img);
    }

    #[test]
    fn test_combine_mismatch_is_lenient() {
        let red = PixelBuffer::filled(3, 2, [9, 9, 9]);
        let green = PixelBuffer::filled(2, 2, [8, 8, 8]);
        let blue = PixelBuffer::filled(3, 2, [7, 7, 7]);
        let combined = rgb_combine(&red, &green, &blue);
        assert!(matches!(combined.mismatch, Some(OpsError::SizeMismatch(_))));
        assert_eq!(combined.image.dimensions(), (3, 2));
        assert_eq!(combined.image.pixel(0, 0), [9, 8, 7]);
        assert_eq!(combined.image.pixel(2, 1), [9, 0, 7]);
    }
}
