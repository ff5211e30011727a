//! Golden values for small hand-checked images.

use pixlab_core::PixelBuffer;
use pixlab_ops::color::brighten;
use pixlab_ops::transform::flip_v;
use pixlab_ops::wavelet::compress;

/// 2x2 red, green / blue, white.
pub fn quad() -> PixelBuffer {
    rows(&[
        vec![[255, 0, 0], [0, 255, 0]],
        vec![[0, 0, 255], [255, 255, 255]],
    ])
}

pub fn quad_flipped() -> PixelBuffer {
    rows(&[
        vec![[0, 0, 255], [255, 255, 255]],
        vec![[255, 0, 0], [0, 255, 0]],
    ])
}

pub fn quad_brightened() -> PixelBuffer {
    rows(&[
        vec![[255, 50, 50], [50, 255, 50]],
        vec![[50, 50, 255], [255, 255, 255]],
    ])
}

fn rows(rows: &[Vec<[u8; 3]>]) -> PixelBuffer {
    PixelBuffer::from_rows(rows).unwrap()
}

/// 3x3 vertical stripes: even columns one color, odd columns another.
fn stripes() -> PixelBuffer {
    PixelBuffer::from_fn(3, 3, |x, _| {
        if x % 2 == 0 { [100, 50, 200] } else { [200, 150, 100] }
    })
}

#[test]
fn test_quad_flip() {
    assert_eq!(flip_v(&quad()), quad_flipped());
}

#[test]
fn test_quad_brighten() {
    assert_eq!(brighten(&quad(), 50), quad_brightened());
}

#[test]
fn test_stripes_half_compressed() {
    let row = vec![[150, 100, 150], [150, 100, 150], [0, 0, 200]];
    let expected = rows(&[row.clone(), row, vec![[0, 0, 0]; 3]]);
    assert_eq!(compress(&stripes(), 50.0).unwrap(), expected);
}

#[test]
fn test_stripes_uncompressed() {
    assert_eq!(compress(&stripes(), 0.0).unwrap(), stripes());
}
