//! Plain-text PPM (`P3`) support.
//!
//! Written byte-for-byte as:
//!
//! ```text
//! P3
//! <width> <height>
//! 255
//! r g b r g b ... (each sample followed by one space, one line per row)
//! ```
//!
//! The reader accepts any whitespace layout, drops `#` comments up to the end
//! of the line and rescales samples when the declared maximum is not 255.

use std::fs;
use std::path::Path;

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Reads a PPM file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "ppm::read");
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Writes a PPM file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), width = image.width(), height = image.height(), "ppm::write");
    fs::write(path, encode(image))?;
    Ok(())
}

/// Parses PPM text.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| IoError::InvalidFile("PPM is not valid text".into()))?;
    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some("P3") => {}
        Some(magic) => {
            return Err(IoError::InvalidFile(format!(
                "expected P3 magic, found '{}'",
                magic
            )));
        }
        None => return Err(IoError::InvalidFile("empty PPM".into())),
    }

    let mut header = |what: &str| -> IoResult<u32> {
        let token = tokens
            .next()
            .ok_or_else(|| IoError::InvalidFile(format!("missing {}", what)))?;
        token
            .parse()
            .map_err(|_| IoError::InvalidFile(format!("bad {}: '{}'", what, token)))
    };
    let width = header("width")?;
    let height = header("height")?;
    let max_value = header("max value")?;
    if max_value == 0 || max_value > 65535 {
        return Err(IoError::InvalidFile(format!("bad max value: {}", max_value)));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| IoError::InvalidFile(format!("image too large: {}x{}", width, height)))?;
    // Each sample takes at least two bytes of text.
    let mut data = Vec::with_capacity(expected.min(bytes.len() / 2));
    for token in tokens.by_ref().take(expected) {
        let v: u32 = token
            .parse()
            .map_err(|_| IoError::InvalidFile(format!("bad sample: '{}'", token)))?;
        if v > max_value {
            return Err(IoError::InvalidFile(format!(
                "sample {} exceeds max value {}",
                v, max_value
            )));
        }
        data.push(scale(v, max_value));
    }
    if data.len() != expected {
        return Err(IoError::InvalidFile(format!(
            "expected {} samples, found {}",
            expected,
            data.len()
        )));
    }
    debug!(width, height, max_value, "Decoded PPM");
    Ok(PixelBuffer::from_data(width, height, data)?)
}

#[inline]
fn scale(v: u32, max_value: u32) -> u8 {
    if max_value == 255 {
        v as u8
    } else {
        ((v as f64 * 255.0 / max_value as f64).round()) as u8
    }
}

/// Serializes to PPM text.
pub fn encode(image: &PixelBuffer) -> Vec<u8> {
    let mut out = format!("P3\n{} {}\n255\n", image.width(), image.height());
    for y in 0..image.height() {
        for &v in image.row(y) {
            out.push_str(&v.to_string());
            out.push(' ');
        }
        out.push('\n');
    }
    out.into_bytes()
}
