//! Multivariate standardized difference for categorical variables
//!
//! A categorical variable with `L` levels is summarized per group by its
//! vector of level proportions. The standardized difference is the
//! Mahalanobis distance between the two vectors under the average of the two
//! multinomial covariance matrices:
//!
//! ```text
//! C[i][i] = (p₀ᵢ(1 - p₀ᵢ) + p₁ᵢ(1 - p₁ᵢ)) / 2
//! C[i][j] = -(p₀ᵢp₀ⱼ + p₁ᵢp₁ⱼ) / 2
//! d       = sqrt((p₁ - p₀)ᵀ C⁻¹ (p₁ - p₀))
//! ```
//!
//! Proportions sum to one, so the first level is dropped from both the
//! difference vector and the covariance matrix before inverting. For a binary
//! variable this reduces to the familiar two-proportion formula.

use crate::traits::{EffectSizeEstimator, PointEstimate};
use crate::types::EffectSizeType;
use nalgebra::{DMatrix, DVector};
use std::collections::BTreeMap;
use stddiff_core::grouping::level_groups;
use stddiff_core::{Dataset, Error, GroupLabel, Level, Result, TwoGroups};
use tracing::{debug, instrument};

/// Singular values below this fraction of the largest one count as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// Per-group level proportions over a shared, ordered set of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProportions {
    levels: Vec<Level>,
    reference: DVector<f64>,
    comparison: DVector<f64>,
}

impl LevelProportions {
    /// Tabulate (weighted) level shares of each group
    ///
    /// A level seen in only one group gets proportion zero in the other.
    /// Levels carrying no weight in either group are left out.
    pub fn from_groups(groups: &TwoGroups<Level>) -> Self {
        let mut table: BTreeMap<&Level, [f64; 2]> = BTreeMap::new();
        for (slot, label) in GroupLabel::ALL.into_iter().enumerate() {
            for (level, weight) in groups.get(label).iter() {
                table.entry(level).or_insert([0.0; 2])[slot] += weight;
            }
        }
        table.retain(|_, totals| totals[0] + totals[1] > 0.0);

        let sizes = groups.sizes();
        let levels: Vec<Level> = table.keys().map(|&level| level.clone()).collect();
        let reference = DVector::from_iterator(
            levels.len(),
            table.values().map(|totals| totals[0] / sizes.reference),
        );
        let comparison = DVector::from_iterator(
            levels.len(),
            table.values().map(|totals| totals[1] / sizes.comparison),
        );

        Self {
            levels,
            reference,
            comparison,
        }
    }

    /// Proportions of `variable`'s levels in each group, after dropping missing rows
    pub fn compute<D: Dataset + ?Sized>(
        data: &D,
        group: &str,
        variable: &str,
        weights: Option<&str>,
    ) -> Result<Self> {
        Ok(Self::from_groups(&level_groups(data, group, variable, weights)?))
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn reference(&self) -> &DVector<f64> {
        &self.reference
    }

    pub fn comparison(&self) -> &DVector<f64> {
        &self.comparison
    }

    /// `p₁ - p₀` over all levels
    pub fn difference(&self) -> DVector<f64> {
        &self.comparison - &self.reference
    }

    /// Average of the two groups' multinomial covariance matrices
    pub fn pooled_covariance(&self) -> DMatrix<f64> {
        let (p0, p1) = (&self.reference, &self.comparison);
        let n = self.levels.len();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                (p0[i] * (1.0 - p0[i]) + p1[i] * (1.0 - p1[i])) / 2.0
            } else {
                -(p0[i] * p0[j] + p1[i] * p1[j]) / 2.0
            }
        })
    }

    /// Mahalanobis distance between the two proportion vectors
    ///
    /// Fails with [`Error::InsufficientData`] for fewer than two levels and
    /// with [`Error::SingularCovariance`] when the reduced covariance matrix
    /// is (numerically) rank deficient.
    pub fn mahalanobis(&self, variable: &str) -> Result<f64> {
        let n_levels = self.levels.len();
        if n_levels < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: n_levels,
            });
        }

        let singular = || Error::SingularCovariance {
            variable: variable.to_string(),
        };

        let diff = self.difference().remove_row(0);
        let covariance = self.pooled_covariance().remove_row(0).remove_column(0);

        let dim = n_levels - 1;
        let svd = covariance.clone().svd(false, false);
        let largest = svd.singular_values.iter().copied().fold(0.0, f64::max);
        if svd.rank(largest * RANK_TOLERANCE) < dim {
            return Err(singular());
        }

        let inverse = covariance.try_inverse().ok_or_else(singular)?;
        let quadratic = diff.dot(&(&inverse * &diff));
        if !quadratic.is_finite() {
            return Err(singular());
        }

        // C⁻¹ is positive definite; only rounding can push the form below zero.
        Ok(quadratic.max(0.0).sqrt())
    }
}

/// Multivariate standardized difference estimator for categorical variables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoricalEffect;

impl CategoricalEffect {
    pub fn new() -> Self {
        Self
    }
}

impl EffectSizeEstimator for CategoricalEffect {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::MultivariateStandardizedDifference
    }

    #[instrument(level = "debug", skip(self, data))]
    fn point_estimate<D: Dataset + ?Sized>(
        &self,
        data: &D,
        group: &str,
        variable: &str,
        weights: Option<&str>,
    ) -> Result<PointEstimate> {
        let groups = level_groups(data, group, variable, weights)?;
        let proportions = LevelProportions::from_groups(&groups);
        debug!(variable, levels = proportions.levels().len(), "tabulated level proportions");

        let value = proportions.mahalanobis(variable)?;

        Ok(PointEstimate {
            value,
            sizes: groups.sizes(),
            counts: (groups.reference().len(), groups.comparison().len()),
        })
    }
}
