//! Error types for the tracer.
//!
//! These cover malformed input at the API boundary only. A ray that misses
//! the surface is an ordinary `None` result, never an error.

use thiserror::Error;

/// Errors that can occur when building a heightfield or starting a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// Surface has no samples.
    #[error("surface is empty")]
    EmptySurface,

    /// Surface rows have different lengths.
    #[error("surface is not rectangular: row {row} has {found} samples, expected {expected}")]
    NonRectangular {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Sample count does not match the declared dimensions.
    #[error("surface has {found} samples, expected {width}x{height}")]
    SizeMismatch {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Number of samples supplied.
        found: usize,
    },

    /// Surface is smaller than a single grid cell.
    #[error("surface must be at least 2x2, got {width}x{height}")]
    SurfaceTooSmall {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// A height sample is NaN or infinite.
    #[error("surface sample at ({x}, {y}) is not finite")]
    NonFiniteSample {
        /// Column of the sample.
        x: usize,
        /// Row of the sample.
        y: usize,
    },

    /// Direction vector has zero length.
    #[error("ray direction has zero length")]
    ZeroDirection,

    /// A camera input is NaN or infinite.
    #[error("{0} is not finite")]
    NonFinite(&'static str),

    /// Invalid render or trace settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TraceError>;
