//! Error types for frame processing.
//!
//! The bitmap and array glue used to read and write raw memory without any
//! checks; every entry point now validates first and reports one of these.

use thiserror::Error;

/// Errors that can occur while processing a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Image is too small for the requested filter.
    #[error("invalid dimensions {width}x{height}: filter needs at least {min}x{min}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min: usize,
    },

    /// `width * height * 4` does not fit in `usize`.
    #[error("image of {width}x{height} pixels is too large to address")]
    DimensionOverflow { width: usize, height: usize },

    /// A pixel buffer does not hold exactly `width * height * 4` bytes.
    #[error("{buffer} buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Which buffer was rejected ("input" or "output")
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Integer processing mode outside the known set.
    #[error("unknown processing mode: {0}")]
    UnknownMode(i32),

    /// Bitmap layout the filters cannot read (non-RGBA, padded rows).
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// Bitmap info retrieval or pixel locking failed.
    #[error("bitmap access failed: {0}")]
    BitmapAccess(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
