//! I/O traits for image readers and writers.
//!
//! The command dispatcher is generic over these, so sessions can run against
//! the filesystem ([`FileCodec`](crate::FileCodec)) or an in-memory stand-in.

use std::path::Path;

use pixlab_core::PixelBuffer;

use crate::IoResult;

/// Something that can load a pixel buffer from a path.
///
/// # Example
///
/// ```rust,ignore
/// use pixlab_io::{ImageReader, FileCodec};
///
/// let image = FileCodec::default().read("koala.ppm")?;
/// ```
pub trait ImageReader {
    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer>;
}

/// Something that can store a pixel buffer at a path.
pub trait ImageWriter {
    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()>;
}
