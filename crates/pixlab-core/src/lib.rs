//! # pixlab-core
//!
//! Core types for the pixlab raster engine.
//!
//! - [`PixelBuffer`] - shared, immutable-once-published RGB raster
//! - [`BufferStore`] - name to buffer registry owned by a session
//! - [`pixel`] - the [`Rgb`] pixel type and channel clamping helpers
//! - [`Error`] / [`Result`] - failure modes of buffers and lookups
//!
//! ## Crate Structure
//!
//! ```text
//! pixlab-core (this crate)
//!    ^
//!    +-- pixlab-ops (filters, color transforms, histogram, wavelet)
//!    +-- pixlab-io (PPM, PNG, JPEG)
//!    +-- pixlab-cli (dispatcher, scripts, interactive mode)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod store;

pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::Rgb;
pub use store::BufferStore;
