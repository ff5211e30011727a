//! PNG format support.
//!
//! Decodes 8- and 16-bit grayscale, grayscale+alpha, RGB, RGBA and palette
//! images to 8-bit RGB. Alpha is dropped and 16-bit samples keep their high
//! byte. Always writes 8-bit RGB.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode_from(BufReader::new(file))
}

/// Decodes a PNG held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(Cursor::new(bytes))
}

fn decode_from<R: BufRead + Seek>(source: R) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let buf = &buf[..info.buffer_size()];

    // Samples per pixel and bytes per sample of the decoded frame
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat("unexpanded palette PNG".into()));
        }
    };
    let depth = match info.bit_depth {
        png::BitDepth::Eight => 1,
        png::BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!("PNG bit depth {:?}", other)));
        }
    };

    let stride = channels * depth;
    let mut rgb = Vec::with_capacity(info.width as usize * info.height as usize * 3);
    for row in buf.chunks_exact(info.line_size) {
        for px in row.chunks_exact(stride).take(info.width as usize) {
            // Big-endian 16-bit samples: the first byte is the high byte
            let sample = |c: usize| px[c * depth];
            match channels {
                1 | 2 => rgb.extend_from_slice(&[sample(0); 3]),
                _ => rgb.extend_from_slice(&[sample(0), sample(1), sample(2)]),
            }
        }
    }
    debug!(width = info.width, height = info.height, color_type = ?info.color_type, "Decoded PNG");
    Ok(PixelBuffer::from_data(info.width, info.height, rgb)?)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_to(BufWriter::new(file), image)
}

/// Encodes an image to PNG bytes.
pub fn encode(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(&mut out, image)?;
    Ok(out)
}

fn encode_to<W: Write>(writer: W, image: &PixelBuffer) -> IoResult<()> {
    trace!(width = image.width(), height = image.height(), "png::encode");
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}
