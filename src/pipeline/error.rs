//! Pipeline error types

use thiserror::Error;

/// Errors that can occur while filtering or aggregating
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Range bounds are reversed or not finite
    #[error("Invalid tourism index range: {lo} to {hi}")]
    InvalidRange { lo: f64, hi: f64 },

    /// Histogram requested with no bins
    #[error("Bin count must be at least 1")]
    ZeroBins,
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
