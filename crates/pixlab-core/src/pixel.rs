//! Pixel type and channel arithmetic helpers.
//!
//! A pixel is three 8-bit channels in `[r, g, b]` order. Operations compute in
//! `f64` or `i32` and come back to `u8` through [`clamp_round`] or
//! [`clamp_i32`], which is the only place channel overflow is handled.

/// An 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Black pixel.
pub const BLACK: Rgb = [0, 0, 0];

/// White pixel.
pub const WHITE: Rgb = [255, 255, 255];

/// Rec.709 luma coefficient for red.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luma coefficient for green.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luma coefficient for blue.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luma weights as an array.
///
/// # Example
///
/// ```rust
/// use pixlab_core::pixel::REC709_LUMA;
///
/// let sum: f64 = REC709_LUMA.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-9);
/// ```
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Rounds to nearest and clamps into the channel range.
///
/// # Example
///
/// ```rust
/// use pixlab_core::pixel::clamp_round;
///
/// assert_eq!(clamp_round(127.5), 128);
/// assert_eq!(clamp_round(-3.2), 0);
/// assert_eq!(clamp_round(300.0), 255);
/// ```
#[inline]
pub fn clamp_round(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Truncates toward zero, then clamps into the channel range.
#[inline]
pub fn clamp_trunc(v: f64) -> u8 {
    v.trunc().clamp(0.0, 255.0) as u8
}

/// Clamps an integer into the channel range.
#[inline]
pub fn clamp_i32(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Rec.709 luma of a pixel, unrounded.
#[inline]
pub fn luma(px: Rgb) -> f64 {
    px[0] as f64 * REC709_LUMA_R + px[1] as f64 * REC709_LUMA_G + px[2] as f64 * REC709_LUMA_B
}
