//! Balance tables over many variables
//!
//! [`BalanceReport`] decides which variables are computed, in which order and
//! with which estimator, then assembles one [`BalanceTable`]. Rows follow the
//! dataset's native column order, not the order variables were requested in.

use crate::categorical::CategoricalEffect;
use crate::config::{EstimationSettings, FailurePolicy};
use crate::continuous::ContinuousEffect;
use crate::traits::EffectSizeEstimator;
use crate::types::EffectSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use stddiff_confidence::ConfidenceLevel;
use stddiff_core::grouping::{group_column, weight_column};
use stddiff_core::utils::ordered_intersection;
use stddiff_core::{Dataset, Error, Result};
use tracing::{debug, instrument, warn};

/// Thread-safety bound on datasets, required only when computing in parallel
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// Thread-safety bound on datasets, required only when computing in parallel
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// How a variable is analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    Continuous,
    /// Continuous, analysed on average ranks
    Skewed,
    Categorical,
}

impl VariableKind {
    fn estimate<D: Dataset + ?Sized>(
        self,
        data: &D,
        group: &str,
        variable: &str,
        settings: &EstimationSettings,
    ) -> Result<EffectSize> {
        match self {
            Self::Continuous => ContinuousEffect::new().estimate(data, group, variable, settings),
            Self::Skewed => ContinuousEffect::skewed().estimate(data, group, variable, settings),
            Self::Categorical => CategoricalEffect::new().estimate(data, group, variable, settings),
        }
    }
}

/// Why a requested variable has no row in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The name is not a column of the dataset
    NotFound,
    /// The computation failed and the report was set to skip failures
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found in dataset columns"),
            Self::Failed(message) => write!(f, "computation failed: {message}"),
        }
    }
}

/// Diagnostic for a variable left out of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedVariable {
    pub variable: String,
    pub reason: SkipReason,
}

/// One row of a [`BalanceTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub variable: String,
    pub kind: VariableKind,
    pub effect: EffectSize,
}

impl BalanceRow {
    /// The rounded standardized difference (`ES`)
    pub fn estimate(&self) -> f64 {
        self.effect.magnitude
    }

    /// `[lower, upper]`, when intervals were requested
    pub fn interval(&self) -> Option<[f64; 2]> {
        self.effect.interval.as_ref().map(|ci| ci.bounds())
    }
}

/// Standardized differences indexed by variable, in dataset column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceTable {
    rows: Vec<BalanceRow>,
    confidence_level: Option<ConfidenceLevel>,
    skipped: Vec<SkippedVariable>,
}

impl BalanceTable {
    pub fn rows(&self) -> &[BalanceRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &BalanceRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row of a variable, by name
    pub fn get(&self, variable: &str) -> Option<&BalanceRow> {
        self.rows.iter().find(|row| row.variable == variable)
    }

    /// Variable names in row order
    pub fn variables(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.variable.as_str()).collect()
    }

    /// `["ES"]`, or `["ES", "95.0% CI"]` when intervals were requested
    pub fn column_labels(&self) -> Vec<String> {
        let mut labels = vec!["ES".to_string()];
        if let Some(level) = self.confidence_level {
            labels.push(level.label());
        }
        labels
    }

    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence_level
    }

    /// Variables that were requested but have no row
    pub fn skipped(&self) -> &[SkippedVariable] {
        &self.skipped
    }
}

impl<'a> IntoIterator for &'a BalanceTable {
    type Item = &'a BalanceRow;
    type IntoIter = std::slice::Iter<'a, BalanceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Builder for a covariate balance table
///
/// ```rust
/// use stddiff_core::{ColumnData, Table};
/// use stddiff_effect::BalanceReport;
///
/// let data = Table::new()
///     .with_column("group", ColumnData::numeric([0, 0, 0, 1, 1, 1]))?
///     .with_column("age", ColumnData::numeric([30.0, 35.0, 40.0, 45.0, 50.0, 55.0]))?
///     .with_column("sex", ColumnData::levels(["f", "m", "f", "m", "m", "f"]))?;
///
/// let table = BalanceReport::new("group")
///     .continuous(["age"])
///     .categorical(["sex"])
///     .intervals(0.95)?
///     .compute(&data)?;
///
/// assert_eq!(table.variables(), vec!["age", "sex"]);
/// assert_eq!(table.column_labels(), vec!["ES", "95.0% CI"]);
/// # Ok::<(), stddiff_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    group: String,
    continuous: Vec<String>,
    categorical: Vec<String>,
    skewed: Vec<String>,
    settings: EstimationSettings,
    failure_policy: FailurePolicy,
}

impl BalanceReport {
    /// Contrast group `1` against group `0` of the `group` column
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            continuous: Vec::new(),
            categorical: Vec::new(),
            skewed: Vec::new(),
            settings: EstimationSettings::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Add continuous variables
    pub fn continuous<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continuous.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add categorical variables
    pub fn categorical<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark continuous variables as skewed, to be analysed on ranks
    pub fn skewed<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skewed.extend(names.into_iter().map(Into::into));
        self
    }

    /// Weight observations by the given column
    pub fn weights(mut self, column: impl Into<String>) -> Self {
        self.settings = self.settings.with_weights(column);
        self
    }

    /// Round estimates and bounds to `decimals` places (default 2)
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.settings = self.settings.with_decimals(decimals);
        self
    }

    /// Report intervals with the given coverage, which must lie in (0, 1)
    pub fn intervals(mut self, coverage: f64) -> Result<Self> {
        self.settings = self.settings.with_coverage(coverage)?;
        Ok(self)
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn settings(&self) -> &EstimationSettings {
        &self.settings
    }

    /// Check names and required columns before any computation
    ///
    /// The group and weight columns are read here, so a column of the wrong
    /// type or an invalid weight fails the whole call under either
    /// [`FailurePolicy`].
    pub fn validate<D: Dataset + ?Sized>(&self, data: &D) -> Result<()> {
        if self.group.trim().is_empty() {
            return Err(Error::InvalidParameter(
                "Group column name must not be empty".to_string(),
            ));
        }
        if !data.has_column(&self.group) {
            return Err(Error::UnknownColumn(self.group.clone()));
        }
        if let Some(weights) = self.settings.weights() {
            if weights.trim().is_empty() {
                return Err(Error::InvalidParameter(
                    "Weight column name must not be empty".to_string(),
                ));
            }
            if !data.has_column(weights) {
                return Err(Error::UnknownColumn(weights.to_string()));
            }
        }
        group_column(data, &self.group)?;
        weight_column(data, self.settings.weights())?;
        Ok(())
    }

    /// Variables to compute, in column order, and those that were not found
    pub fn plan<D: Dataset + ?Sized>(
        &self,
        data: &D,
    ) -> (Vec<(String, VariableKind)>, Vec<SkippedVariable>) {
        let columns = data.column_names();

        for name in &self.skewed {
            if !self.continuous.contains(name) {
                warn!(variable = %name, "Skewed variable is not listed as continuous and is ignored as skewed");
            }
        }

        let mut skipped: Vec<SkippedVariable> = Vec::new();
        for name in self.continuous.iter().chain(&self.categorical) {
            if !columns.contains(name) && !skipped.iter().any(|s| &s.variable == name) {
                warn!(
                    "The following variable was not computed as it could not be found in dataset columns: {}",
                    name
                );
                skipped.push(SkippedVariable {
                    variable: name.clone(),
                    reason: SkipReason::NotFound,
                });
            }
        }

        let requested: Vec<&str> = self
            .continuous
            .iter()
            .chain(&self.categorical)
            .map(String::as_str)
            .collect();
        let ordered = ordered_intersection(&columns, &requested);

        let plan = ordered
            .into_iter()
            .map(|name| {
                let kind = if self.continuous.contains(&name) {
                    if self.categorical.contains(&name) {
                        debug!(variable = %name, "listed as continuous and categorical; treated as continuous");
                    }
                    if self.skewed.contains(&name) {
                        VariableKind::Skewed
                    } else {
                        VariableKind::Continuous
                    }
                } else {
                    VariableKind::Categorical
                };
                (name, kind)
            })
            .collect();

        (plan, skipped)
    }

    /// Compute the balance table
    #[instrument(skip(self, data), fields(group = %self.group))]
    pub fn compute<D: Dataset + MaybeSync + ?Sized>(&self, data: &D) -> Result<BalanceTable> {
        self.validate(data)?;
        let (plan, mut skipped) = self.plan(data);
        debug!(variables = plan.len(), not_found = skipped.len(), "planned balance table");

        let outcomes = self.estimate_all(data, &plan);

        let mut rows = Vec::with_capacity(plan.len());
        for ((variable, kind), outcome) in plan.into_iter().zip(outcomes) {
            match outcome {
                Ok(effect) => rows.push(BalanceRow {
                    variable,
                    kind,
                    effect,
                }),
                Err(error)
                    if self.failure_policy == FailurePolicy::Skip && error.is_per_variable() =>
                {
                    warn!(variable = %variable, %error, "Skipping variable");
                    skipped.push(SkippedVariable {
                        variable,
                        reason: SkipReason::Failed(error.to_string()),
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(BalanceTable {
            rows,
            confidence_level: self.settings.intervals,
            skipped,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn estimate_all<D: Dataset + MaybeSync + ?Sized>(
        &self,
        data: &D,
        plan: &[(String, VariableKind)],
    ) -> Vec<Result<EffectSize>> {
        let mut outcomes = Vec::with_capacity(plan.len());
        for (variable, kind) in plan {
            let outcome = kind.estimate(data, &self.group, variable, &self.settings);
            let abort = outcome.is_err() && self.failure_policy == FailurePolicy::Abort;
            outcomes.push(outcome);
            if abort {
                break;
            }
        }
        outcomes
    }

    #[cfg(feature = "parallel")]
    fn estimate_all<D: Dataset + MaybeSync + ?Sized>(
        &self,
        data: &D,
        plan: &[(String, VariableKind)],
    ) -> Vec<Result<EffectSize>> {
        use rayon::prelude::*;

        plan.par_iter()
            .map(|(variable, kind)| kind.estimate(data, &self.group, variable, &self.settings))
            .collect()
    }
}

/// Standardized differences of the requested variables
///
/// Function form of [`BalanceReport`]: `continuous` names are analysed as
/// continuous (on ranks when also in `skewed`), `categorical` names as
/// categorical. `intervals` is an optional coverage in (0, 1).
#[allow(clippy::too_many_arguments)]
pub fn compute<D: Dataset + MaybeSync + ?Sized>(
    data: &D,
    group: &str,
    continuous: &[&str],
    categorical: &[&str],
    skewed: &[&str],
    weights: Option<&str>,
    decimals: u32,
    intervals: Option<f64>,
) -> Result<BalanceTable> {
    let mut report = BalanceReport::new(group)
        .continuous(continuous.iter().copied())
        .categorical(categorical.iter().copied())
        .skewed(skewed.iter().copied())
        .decimals(decimals);
    if let Some(weights) = weights {
        report = report.weights(weights);
    }
    if let Some(coverage) = intervals {
        report = report.intervals(coverage)?;
    }
    report.compute(data)
}
