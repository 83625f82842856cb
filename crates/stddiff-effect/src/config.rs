//! Settings shared by every per-variable computation

use serde::{Deserialize, Serialize};
use stddiff_confidence::ConfidenceLevel;
use stddiff_core::Result;

/// Precision, weighting and interval options for a computation
///
/// Passed explicitly to every estimator; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationSettings {
    /// Name of the frequency-weight column, if any
    pub weights: Option<String>,
    /// Decimal places of reported estimates and interval bounds
    pub decimals: u32,
    /// Interval coverage; `None` reports point estimates only
    pub intervals: Option<ConfidenceLevel>,
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self {
            weights: None,
            decimals: 2,
            intervals: None,
        }
    }
}

impl EstimationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight observations by the given column
    pub fn with_weights(mut self, column: impl Into<String>) -> Self {
        self.weights = Some(column.into());
        self
    }

    /// Round reported values to `decimals` places
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Report intervals at the given confidence level
    pub fn with_intervals(mut self, level: ConfidenceLevel) -> Self {
        self.intervals = Some(level);
        self
    }

    /// Report intervals at a raw coverage probability, validated to lie in (0, 1)
    pub fn with_coverage(self, coverage: f64) -> Result<Self> {
        Ok(self.with_intervals(ConfidenceLevel::new(coverage)?))
    }

    pub fn weights(&self) -> Option<&str> {
        self.weights.as_deref()
    }
}

/// What a report does when a single variable cannot be computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Propagate the first per-variable error and return no table
    #[default]
    Abort,
    /// Record the failure as a diagnostic and carry on with the next variable
    Skip,
}
