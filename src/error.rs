//! Error types shared by every search strategy.
//!
//! Only malformed input is an error. A run that never reaches a target
//! score is a normal outcome and is reported through the result types.

use thiserror::Error;

/// Errors raised while validating a problem or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A coordinate bound is inverted or not finite.
    #[error("invalid bound at coordinate {index}: [{min}, {max}]")]
    InvalidBound { index: usize, min: f64, max: f64 },

    /// A parameter or gene vector has the wrong length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A beam stage offers no candidate tokens, so no complete sequence exists.
    #[error("stage {stage} has no candidates")]
    EmptyStage { stage: usize },

    /// The problem definition itself is inconsistent.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
