//! Core traits for effect size estimation

use crate::config::EstimationSettings;
use crate::types::{EffectSize, EffectSizeType};
use stddiff_confidence::{IntervalEstimator, NormalApproximationCI};
use stddiff_core::numeric::round_to;
use stddiff_core::{Dataset, GroupSizes, Result};

/// Unrounded estimate together with the sample it was computed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEstimate {
    /// Raw standardized difference
    pub value: f64,
    /// Effective group sizes (weight sums when weighted)
    pub sizes: GroupSizes,
    /// Row counts per group (group 0, group 1)
    pub counts: (usize, usize),
}

/// Standardized difference of one variable between group 1 and group 0
pub trait EffectSizeEstimator {
    /// Get the type of effect size this estimator computes
    fn effect_size_type(&self) -> EffectSizeType;

    /// Compute the unrounded estimate for `variable`
    fn point_estimate<D: Dataset + ?Sized>(
        &self,
        data: &D,
        group: &str,
        variable: &str,
        weights: Option<&str>,
    ) -> Result<PointEstimate>;

    /// Rounded estimate, with an interval when `settings` asks for one
    ///
    /// The interval is built around the rounded estimate and sized on the
    /// same rows the estimate used.
    fn estimate<D: Dataset + ?Sized>(
        &self,
        data: &D,
        group: &str,
        variable: &str,
        settings: &EstimationSettings,
    ) -> Result<EffectSize> {
        let point = self.point_estimate(data, group, variable, settings.weights())?;
        let magnitude = round_to(point.value, settings.decimals);
        let effect = EffectSize::new(magnitude, self.effect_size_type(), Some(point.counts));

        match settings.intervals {
            Some(level) => {
                let interval = NormalApproximationCI::new(level).interval_from_sizes(
                    magnitude,
                    point.sizes,
                    settings.decimals,
                )?;
                Ok(effect.with_interval(interval))
            }
            None => Ok(effect),
        }
    }
}
