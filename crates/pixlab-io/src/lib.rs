//! # pixlab-io
//!
//! Image file loading and saving for pixlab.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PPM (P3) | Yes | Yes | always |
//! | PNG | Yes | Yes | `png` |
//! | JPEG | Yes | Yes | `jpeg` |
//!
//! The format is picked from the file extension; unknown extensions fall back
//! to sniffing the file header when reading.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixlab_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.ppm", &image)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod detect;
pub mod ppm;
mod traits;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

use std::path::Path;

use pixlab_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

/// Reads an image, detecting the format.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    FileCodec::default().read(path)
}

/// Writes an image in the format named by the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    FileCodec::default().write(path, image)
}

/// Filesystem-backed reader/writer dispatching on [`Format`].
#[derive(Debug, Clone, Copy)]
pub struct FileCodec {
    /// JPEG quality used on write (1-100).
    pub jpeg_quality: u8,
}

impl Default for FileCodec {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

impl ImageReader for FileCodec {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
        let path = path.as_ref();
        let format = Format::detect(path)?;
        trace!(path = %path.display(), ?format, "read");

        let image = match format {
            Format::Ppm => ppm::read(path)?,
            #[cfg(feature = "png")]
            Format::Png => png::read(path)?,
            #[cfg(feature = "jpeg")]
            Format::Jpeg => jpeg::read(path)?,
            #[allow(unreachable_patterns)]
            _ => {
                return Err(IoError::UnsupportedFormat(format!(
                    "cannot read {}",
                    path.display()
                )));
            }
        };
        info!(path = %path.display(), width = image.width(), height = image.height(), "Loaded image");
        Ok(image)
    }
}

impl ImageWriter for FileCodec {
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
        let path = path.as_ref();
        let format = Format::from_extension(path);
        trace!(path = %path.display(), ?format, "write");

        match format {
            Format::Ppm => ppm::write(path, image)?,
            #[cfg(feature = "png")]
            Format::Png => png::write(path, image)?,
            #[cfg(feature = "jpeg")]
            Format::Jpeg => jpeg::write(path, image, self.jpeg_quality)?,
            #[allow(unreachable_patterns)]
            _ => {
                return Err(IoError::UnsupportedFormat(format!(
                    "cannot write {}",
                    path.display()
                )));
            }
        }
        info!(path = %path.display(), "Saved image");
        Ok(())
    }
}
