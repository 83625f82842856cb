//! Per-group mean and variance with optional frequency weights
//!
//! The variance is the unbiased sample variance: `Σw(x - m)² / (Σw - 1)`.
//! With unit weights this is the usual `n - 1` estimator, so the unweighted
//! path is the weighted one with every weight set to `1.0`.

use crate::dataset::Dataset;
use crate::grouping::{numeric_groups, GroupLabel, GroupSample, TwoGroups};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Mean and variance of one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMoments {
    pub mean: f64,
    /// Unbiased sample variance, `NaN` when fewer than two (weighted) observations
    pub variance: f64,
}

impl GroupMoments {
    /// Compute the weighted mean and unbiased weighted variance of a sample
    pub fn of(sample: &GroupSample<f64>) -> Self {
        let total_weight = sample.total_weight();
        let mean = sample.iter().map(|(&x, w)| w * x).sum::<f64>() / total_weight;

        let denominator = total_weight - 1.0;
        let variance = if denominator > 0.0 {
            sample
                .iter()
                .map(|(&x, w)| {
                    let diff = x - mean;
                    w * diff * diff
                })
                .sum::<f64>()
                / denominator
        } else {
            f64::NAN
        };

        Self { mean, variance }
    }
}

/// Means and variances of both groups for a single variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedMoments {
    pub reference: GroupMoments,
    pub comparison: GroupMoments,
}

impl WeightedMoments {
    /// Moments of a numeric column, after dropping missing rows
    pub fn compute<D: Dataset + ?Sized>(
        data: &D,
        group: &str,
        variable: &str,
        weights: Option<&str>,
    ) -> Result<Self> {
        let groups = numeric_groups(data, group, variable, weights)?;
        Ok(Self::from_groups(&groups))
    }

    /// Moments of an already split sample
    pub fn from_groups(groups: &TwoGroups<f64>) -> Self {
        Self {
            reference: GroupMoments::of(groups.reference()),
            comparison: GroupMoments::of(groups.comparison()),
        }
    }

    pub fn get(&self, label: GroupLabel) -> GroupMoments {
        match label {
            GroupLabel::Reference => self.reference,
            GroupLabel::Comparison => self.comparison,
        }
    }

    /// `(mean₀, mean₁, var₀, var₁)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.reference.mean,
            self.comparison.mean,
            self.reference.variance,
            self.comparison.variance,
        )
    }

    /// Group 1 mean minus group 0 mean
    pub fn mean_difference(&self) -> f64 {
        self.comparison.mean - self.reference.mean
    }

    /// Simple average of the two group variances
    pub fn pooled_variance(&self) -> f64 {
        (self.reference.variance + self.comparison.variance) / 2.0
    }
}
