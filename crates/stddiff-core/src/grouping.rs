//! Splitting observations into the two contrasted groups
//!
//! Every computation starts the same way: read the group column, the analysed
//! column and (optionally) the weight column, drop rows where any of them is
//! missing, and route each remaining row to group `0` or group `1` by value.
//! Rows whose group value is neither `0` nor `1` take no part in the contrast.

use crate::dataset::{Dataset, Level};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One of the two contrasted groups
///
/// Results are always expressed as `Comparison` minus `Reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupLabel {
    /// Group coded `0` (e.g. unexposed, control)
    Reference,
    /// Group coded `1` (e.g. exposed, treated)
    Comparison,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; 2] = [GroupLabel::Reference, GroupLabel::Comparison];

    /// The coded value of the label in the group column
    pub fn value(self) -> f64 {
        match self {
            Self::Reference => 0.0,
            Self::Comparison => 1.0,
        }
    }

    /// Look a label up by its coded value
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Self::Reference)
        } else if value == 1.0 {
            Some(Self::Comparison)
        } else {
            None
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "0"),
            Self::Comparison => write!(f, "1"),
        }
    }
}

/// Observations of one group after missing rows were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSample<V> {
    values: Vec<V>,
    weights: Vec<f64>,
}

impl<V> GroupSample<V> {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            weights: Vec::new(),
        }
    }

    fn push(&mut self, value: V, weight: f64) {
        self.values.push(value);
        self.weights.push(weight);
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Per-observation weights (all `1.0` for unweighted samples)
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of weights; equals the row count when unweighted
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Iterate over `(value, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> {
        self.values.iter().zip(self.weights.iter().copied())
    }
}

/// The two contrasted groups of a single variable
#[derive(Debug, Clone, PartialEq)]
pub struct TwoGroups<V> {
    reference: GroupSample<V>,
    comparison: GroupSample<V>,
    weighted: bool,
}

impl<V> TwoGroups<V> {
    pub fn get(&self, label: GroupLabel) -> &GroupSample<V> {
        match label {
            GroupLabel::Reference => &self.reference,
            GroupLabel::Comparison => &self.comparison,
        }
    }

    pub fn reference(&self) -> &GroupSample<V> {
        &self.reference
    }

    pub fn comparison(&self) -> &GroupSample<V> {
        &self.comparison
    }

    /// Whether the samples carry caller-supplied weights
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Group sizes: weight sums when weighted, row counts otherwise
    pub fn sizes(&self) -> GroupSizes {
        GroupSizes {
            reference: self.reference.total_weight(),
            comparison: self.comparison.total_weight(),
        }
    }
}

/// Effective size of each group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSizes {
    pub reference: f64,
    pub comparison: f64,
}

impl GroupSizes {
    pub fn total(&self) -> f64 {
        self.reference + self.comparison
    }

    pub fn get(&self, label: GroupLabel) -> f64 {
        match label {
            GroupLabel::Reference => self.reference,
            GroupLabel::Comparison => self.comparison,
        }
    }
}

/// Read the group column, with `NaN` folded into missing
pub fn group_column<D: Dataset + ?Sized>(data: &D, group: &str) -> Result<Vec<Option<f64>>> {
    Ok(data
        .numeric_column(group)?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read and validate the weight column, if any
///
/// `NaN` weights count as missing; negative or infinite weights are rejected
/// because they have no frequency-weight interpretation.
pub fn weight_column<D: Dataset + ?Sized>(
    data: &D,
    weights: Option<&str>,
) -> Result<Option<Vec<Option<f64>>>> {
    let Some(name) = weights else {
        return Ok(None);
    };

    let column = data.numeric_column(name)?;
    let mut cleaned = Vec::with_capacity(column.len());
    for value in column {
        match value {
            Some(w) if w.is_nan() => cleaned.push(None),
            Some(w) if w.is_infinite() || w < 0.0 => {
                return Err(Error::InvalidInput(format!(
                    "Weight column '{name}' contains invalid weight {w}; weights must be finite and non-negative"
                )));
            }
            other => cleaned.push(other),
        }
    }
    Ok(Some(cleaned))
}

/// Route rows into the two groups, dropping rows with any missing cell
///
/// Fails with [`Error::MissingGroup`] when a group ends up without
/// observations, or with zero total weight.
pub fn split_by_group<V>(
    variable: &str,
    groups: &[Option<f64>],
    values: Vec<Option<V>>,
    weights: Option<&[Option<f64>]>,
) -> Result<TwoGroups<V>> {
    if values.len() != groups.len() {
        return Err(Error::size_mismatch(
            groups.len(),
            values.len(),
            &format!("column '{variable}'"),
        ));
    }
    if let Some(w) = weights {
        if w.len() != groups.len() {
            return Err(Error::size_mismatch(groups.len(), w.len(), "weight column"));
        }
    }

    let mut reference = GroupSample::new();
    let mut comparison = GroupSample::new();

    for (row, (&group, value)) in groups.iter().zip(values).enumerate() {
        let Some(value) = value else { continue };
        let Some(label) = group.and_then(GroupLabel::from_value) else {
            continue;
        };
        let weight = match weights {
            Some(w) => match w[row] {
                Some(weight) => weight,
                None => continue,
            },
            None => 1.0,
        };
        match label {
            GroupLabel::Reference => reference.push(value, weight),
            GroupLabel::Comparison => comparison.push(value, weight),
        }
    }

    let split = TwoGroups {
        reference,
        comparison,
        weighted: weights.is_some(),
    };

    for label in GroupLabel::ALL {
        let sample = split.get(label);
        if sample.is_empty() || sample.total_weight() <= 0.0 {
            return Err(Error::missing_group(label, variable));
        }
    }

    debug!(
        variable,
        reference = split.reference.len(),
        comparison = split.comparison.len(),
        weighted = split.weighted,
        "split observations by group"
    );

    Ok(split)
}

/// Numeric values of `variable`, split by group
pub fn numeric_groups<D: Dataset + ?Sized>(
    data: &D,
    group: &str,
    variable: &str,
    weights: Option<&str>,
) -> Result<TwoGroups<f64>> {
    let groups = group_column(data, group)?;
    let weight_values = weight_column(data, weights)?;
    let values: Vec<Option<f64>> = data
        .numeric_column(variable)?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    split_by_group(variable, &groups, values, weight_values.as_deref())
}

/// Categorical levels of `variable`, split by group
pub fn level_groups<D: Dataset + ?Sized>(
    data: &D,
    group: &str,
    variable: &str,
    weights: Option<&str>,
) -> Result<TwoGroups<Level>> {
    let groups = group_column(data, group)?;
    let weight_values = weight_column(data, weights)?;
    let values = data.level_column(variable)?;
    split_by_group(variable, &groups, values, weight_values.as_deref())
}

/// Per-group sizes over the rows where group, `variable` and weight are present
///
/// Sizes are row counts when unweighted and weight sums when weighted.
pub fn group_sizes<D: Dataset + ?Sized>(
    data: &D,
    group: &str,
    variable: &str,
    weights: Option<&str>,
) -> Result<GroupSizes> {
    let groups = group_column(data, group)?;
    let weight_values = weight_column(data, weights)?;
    // Only presence matters here, so any readable view of the column will do.
    let present: Vec<Option<()>> = data
        .level_column(variable)?
        .into_iter()
        .map(|v| v.map(|_| ()))
        .collect();
    let split = split_by_group(variable, &groups, present, weight_values.as_deref())?;
    Ok(split.sizes())
}
