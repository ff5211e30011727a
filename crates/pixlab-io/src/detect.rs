//! Picks a codec for a path.
//!
//! The extension decides when it names PPM, PNG or JPEG. Otherwise the reader
//! peeks at the leading bytes of the file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::IoResult;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Codec selected for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain-text `P3` pixmap.
    Ppm,
    /// PNG.
    Png,
    /// JPEG/JFIF.
    Jpeg,
    /// Nothing pixlab can handle.
    Unknown,
}

impl Format {
    /// Extension first, then the file header.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_extension(path) {
            Format::Unknown => {
                let mut head = [0u8; PNG_SIGNATURE.len()];
                let n = File::open(path)?.read(&mut head)?;
                Ok(Self::from_bytes(&head[..n]))
            }
            known => Ok(known),
        }
    }

    /// Case-insensitive match on `ppm`, `png`, `jpg` and `jpeg`.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Format::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "ppm" => Format::Ppm,
            "png" => Format::Png,
            "jpg" | "jpeg" => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Classifies a file header.
    pub fn from_bytes(head: &[u8]) -> Self {
        match head {
            h if h.starts_with(&PNG_SIGNATURE) => Format::Png,
            h if h.starts_with(&JPEG_SOI) => Format::Jpeg,
            [b'P', b'3', sep, ..] if sep.is_ascii_whitespace() => Format::Ppm,
            _ => Format::Unknown,
        }
    }
}
