//! JPEG format support.
//!
//! Reads RGB, grayscale and CMYK JPEGs into 8-bit RGB and writes baseline
//! RGB at a configurable quality. JPEG is lossy: a save/load round trip does
//! not reproduce pixels exactly.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode_from(BufReader::new(file))
}

/// Decodes a JPEG held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(bytes)
}

fn decode_from<R: Read>(source: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(source);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => {
            // High byte of each big-endian sample
            pixels.chunks_exact(2).flat_map(|l| [l[0], l[0], l[0]]).collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                let k = 1.0 - cmyk[3] as f32 / 255.0;
                [0, 1, 2].map(|c| ((1.0 - cmyk[c] as f32 / 255.0) * k * 255.0) as u8)
            })
            .collect(),
    };
    debug!(width = info.width, height = info.height, format = ?info.pixel_format, "Decoded JPEG");
    Ok(PixelBuffer::from_data(info.width as u32, info.height as u32, rgb)?)
}

/// Writes a JPEG file at `quality` (1-100).
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    fs::write(path.as_ref(), encode(image, quality)?)?;
    Ok(())
}

/// Encodes to JPEG bytes at `quality` (1-100).
pub fn encode(image: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    trace!(width = image.width(), height = image.height(), quality, "jpeg::encode");
    let too_big = |v: u32| u16::try_from(v).map_err(|_| {
        IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit",
            image.width(),
            image.height()
        ))
    });
    let width = too_big(image.width())?;
    let height = too_big(image.height())?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(image.data(), width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
