//! Core traits for interval construction

use crate::{ConfidenceInterval, ConfidenceLevel};
use stddiff_core::grouping::{group_sizes, GroupSizes};
use stddiff_core::{Dataset, Result};

/// Builds an interval around an already computed standardized difference
///
/// Implementations only need the effective group sizes; how the point
/// estimate was obtained does not matter.
pub trait IntervalEstimator {
    /// Coverage of the intervals produced
    fn confidence_level(&self) -> ConfidenceLevel;

    /// Interval from known group sizes, bounds rounded to `decimals`
    fn interval_from_sizes(
        &self,
        estimate: f64,
        sizes: GroupSizes,
        decimals: u32,
    ) -> Result<ConfidenceInterval>;

    /// Interval sized from the rows of `data` where group, `variable` and
    /// weight are all present
    fn interval<D: Dataset + ?Sized>(
        &self,
        data: &D,
        group: &str,
        variable: &str,
        estimate: f64,
        weights: Option<&str>,
        decimals: u32,
    ) -> Result<ConfidenceInterval> {
        let sizes = group_sizes(data, group, variable, weights)?;
        self.interval_from_sizes(estimate, sizes, decimals)
    }
}
