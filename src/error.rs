//! Error types for sprite slicing

use thiserror::Error;

/// Error returned by the slicing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// Row grouping was asked for a negative Y tolerance
    #[error("y tolerance must be >= 0, got {0}")]
    NegativeTolerance(i32),
    /// Pixel buffer length does not match the grid dimensions
    #[error("pixel buffer has {len} entries, which does not fit a {width}x{height} grid")]
    GridSizeMismatch { width: usize, height: usize, len: usize },
    /// Input image exceeds the configured pixel budget
    #[error("image has {pixels} pixels, which exceeds the limit of {limit}")]
    TooLarge { pixels: u64, limit: u64 },
}
