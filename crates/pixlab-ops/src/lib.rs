//! # pixlab-ops
//!
//! Raster operations over [`PixelBuffer`](pixlab_core::PixelBuffer)s.
//!
//! Every operation is a pure function: it reads its source buffers and
//! returns a new buffer. Parameters are validated before any pixel work.
//!
//! # Modules
//!
//! - [`split`] - split-preview compositing shared by most filters
//! - [`transform`] - horizontal and vertical flips
//! - [`filter`] - convolution, blur and sharpen
//! - [`color`] - brightness, component extraction, sepia, grayscale, RGB split/combine
//! - [`histogram`] - per-channel counts, peaks and the line plot
//! - [`correct`] - histogram-peak color correction
//! - [`levels`] - three-point levels adjustment
//! - [`wavelet`] - Haar wavelet compression
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::PixelBuffer;
//! use pixlab_ops::{filter, split::Split, transform};
//!
//! let img = PixelBuffer::filled(8, 8, [90, 120, 30]);
//! let out = filter::blur(&transform::flip_h(&img), Split::new(50).unwrap());
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod correct;
pub mod filter;
pub mod histogram;
pub mod levels;
pub mod split;
pub mod transform;
pub mod wavelet;

pub use color::Component;
pub use error::{OpsError, OpsResult};
pub use levels::Levels;
pub use split::Split;
