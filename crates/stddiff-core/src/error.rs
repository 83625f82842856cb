//! Error types for standardized difference computations
//!
//! Provides a unified error type for all stddiff crates.

use crate::grouping::GroupLabel;
use thiserror::Error;

/// Core error type for balance computations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed call parameter (coverage out of range, empty names, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected}, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// One of the two contrasted groups has no observations (or no weight)
    #[error("Group {label} has no observations for variable '{variable}'")]
    MissingGroup { label: GroupLabel, variable: String },

    /// The reduced categorical covariance matrix cannot be inverted
    #[error("Covariance matrix for variable '{variable}' is singular")]
    SingularCovariance { variable: String },

    /// A column required by the computation is not part of the dataset
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A column holds values of the wrong kind for the requested access
    #[error("Type mismatch in column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a group that vanished after dropping missing rows
    pub fn missing_group(label: GroupLabel, variable: &str) -> Self {
        Self::MissingGroup {
            label,
            variable: variable.to_string(),
        }
    }

    /// Create an error for an invalid coverage probability
    pub fn invalid_coverage(coverage: f64) -> Self {
        Self::InvalidParameter(format!(
            "Coverage {coverage} must be in (0, 1), e.g. 0.95 for a 95% interval"
        ))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Whether the error concerns a single variable rather than the whole call
    ///
    /// These are the errors a report may downgrade to a diagnostic.
    pub fn is_per_variable(&self) -> bool {
        matches!(
            self,
            Self::MissingGroup { .. }
                | Self::SingularCovariance { .. }
                | Self::InsufficientData { .. }
                | Self::TypeMismatch { .. }
        )
    }
}
