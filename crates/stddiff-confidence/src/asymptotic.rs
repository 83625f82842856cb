//! Normal-approximation intervals for standardized differences

use crate::{ConfidenceInterval, ConfidenceLevel, IntervalEstimator};
use statrs::distribution::{ContinuousCDF, Normal};
use stddiff_core::grouping::{GroupLabel, GroupSizes};
use stddiff_core::numeric::round_to;
use stddiff_core::{Error, Result};
use tracing::debug;

/// Large-sample interval for a standardized difference
///
/// The standard error of a standardized difference `d` between groups of
/// (weighted) sizes `n₀` and `n₁` is approximated by
///
/// ```text
/// SE = sqrt((n₀ + n₁) / (n₀ n₁) + d² / (2 (n₀ + n₁)))
/// ```
///
/// and the interval is `d ∓ z·SE` with `z` the upper `(1 + level) / 2`
/// quantile of the standard normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalApproximationCI {
    /// Confidence level
    confidence_level: ConfidenceLevel,
}

impl NormalApproximationCI {
    pub fn new(confidence_level: ConfidenceLevel) -> Self {
        Self { confidence_level }
    }

    /// Validate a raw coverage probability and build the estimator
    pub fn with_coverage(coverage: f64) -> Result<Self> {
        Ok(Self::new(ConfidenceLevel::new(coverage)?))
    }

    /// Two-sided critical value of the standard normal
    pub fn critical_value(&self) -> Result<f64> {
        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            Error::Computation(format!("Failed to create normal distribution: {}", e))
        })?;
        Ok(normal.inverse_cdf(self.confidence_level.upper_percentile()))
    }

    /// Approximate standard error of `estimate` for the given group sizes
    pub fn standard_error(estimate: f64, sizes: GroupSizes) -> Result<f64> {
        for label in GroupLabel::ALL {
            if sizes.get(label) <= 0.0 {
                return Err(Error::MissingGroup {
                    label,
                    variable: "<interval sizing>".to_string(),
                });
            }
        }
        let total = sizes.total();
        Ok((total / (sizes.reference * sizes.comparison)
            + estimate * estimate / (2.0 * total))
            .sqrt())
    }
}

impl IntervalEstimator for NormalApproximationCI {
    fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    fn interval_from_sizes(
        &self,
        estimate: f64,
        sizes: GroupSizes,
        decimals: u32,
    ) -> Result<ConfidenceInterval> {
        let std_error = Self::standard_error(estimate, sizes)?;
        let critical_value = self.critical_value()?;
        let margin = critical_value * std_error;

        debug!(
            estimate,
            reference = sizes.reference,
            comparison = sizes.comparison,
            std_error,
            critical_value,
            "normal approximation interval"
        );

        Ok(ConfidenceInterval::new(
            round_to(estimate - margin, decimals),
            round_to(estimate + margin, decimals),
            estimate,
            self.confidence_level.value(),
        ))
    }
}
