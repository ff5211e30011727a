//! Error types for pixlab-core.
//!
//! Covers the failure modes of buffer construction and store lookups.
//! Pixel arithmetic never fails: out-of-range channel values are clamped,
//! so nothing here describes overflow.
//!
//! # Usage
//!
//! ```rust
//! use pixlab_core::{BufferStore, Error};
//!
//! let store = BufferStore::new();
//! match store.get("missing") {
//!     Err(Error::NotFound { name }) => assert_eq!(name, "missing"),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel buffers and the buffer store.
#[derive(Debug, Error)]
pub enum Error {
    /// No buffer is registered under the requested name.
    #[error("image '{name}' not found")]
    NotFound {
        /// Name that was looked up
        name: String,
    },

    /// Sample data does not describe a `width x height` RGB grid.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What was wrong
        reason: String,
    },

    /// Two buffers that must agree in size do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a [`Error::NotFound`] for `name`.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] from two `(width, height)` pairs.
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` for lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::not_found("koala").to_string(), "image 'koala' not found");
        let err = Error::dimension_mismatch((4, 3), (2, 2));
        assert_eq!(err.to_string(), "dimension mismatch: 4x3 vs 2x2");
        let err = Error::invalid_dimensions(2, 2, "expected 12 samples, got 5");
        assert!(err.to_string().contains("expected 12"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::dimension_mismatch((1, 1), (2, 2)).is_not_found());
    }
}
