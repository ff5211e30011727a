//! Error types for raster operations.

use thiserror::Error;

/// Error type for raster operations.
///
/// All variants are raised before any pixel work starts, so a failed
/// operation never produces a partial result.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Operands that must agree in size do not.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure reported by pixlab-core.
    #[error(transparent)]
    Core(#[from] pixlab_core::Error),
}

/// Result type for raster operations.
pub type OpsResult<T> = Result<T, OpsError>;
