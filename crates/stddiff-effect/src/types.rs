//! Types for effect size representation

use serde::{Deserialize, Serialize};
use std::fmt;
use stddiff_confidence::ConfidenceInterval;

/// Types of standardized differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSizeType {
    /// Difference in means over the pooled standard deviation
    StandardizedMeanDifference,
    /// Standardized mean difference of average ranks (skewed variables)
    RankStandardizedDifference,
    /// Mahalanobis distance between level-proportion vectors (categorical variables)
    MultivariateStandardizedDifference,
}

impl EffectSizeType {
    /// Get the name of the effect size type
    pub fn name(&self) -> &'static str {
        match self {
            Self::StandardizedMeanDifference => "Standardized Mean Difference",
            Self::RankStandardizedDifference => "Rank Standardized Difference",
            Self::MultivariateStandardizedDifference => "Multivariate Standardized Difference",
        }
    }
}

/// A standardized difference with its optional interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// Point estimate, rounded to the requested precision
    pub magnitude: f64,
    /// The type of effect size
    pub effect_type: EffectSizeType,
    /// Interpretation of the magnitude
    pub interpretation: EffectSizeInterpretation,
    /// Interval around the estimate, if one was requested
    pub interval: Option<ConfidenceInterval>,
    /// Rows used per group (group 0, group 1)
    pub sample_sizes: Option<(usize, usize)>,
}

impl EffectSize {
    /// Create a new effect size
    pub fn new(
        magnitude: f64,
        effect_type: EffectSizeType,
        sample_sizes: Option<(usize, usize)>,
    ) -> Self {
        Self {
            magnitude,
            effect_type,
            interpretation: EffectSizeInterpretation::from_magnitude(magnitude),
            interval: None,
            sample_sizes,
        }
    }

    /// Attach a confidence interval
    pub fn with_interval(mut self, interval: ConfidenceInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Get the absolute magnitude
    pub fn abs_magnitude(&self) -> f64 {
        self.magnitude.abs()
    }

    /// Whether the groups count as balanced on this variable
    ///
    /// A threshold of 0.1 is the usual choice in covariate balance checks.
    pub fn is_balanced(&self, threshold: f64) -> bool {
        self.abs_magnitude() < threshold
    }

    /// Check if the difference points towards group 1 (positive)
    pub fn favors_comparison(&self) -> bool {
        self.magnitude > 0.0
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.effect_type.name(), self.magnitude)?;
        if let Some(interval) = &self.interval {
            write!(f, " {}", interval)?;
        }
        write!(f, " ({})", self.interpretation)
    }
}

/// Interpretation of effect size magnitude following Cohen's conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSizeInterpretation {
    /// Negligible effect (very small)
    Negligible,
    /// Small effect
    Small,
    /// Medium effect
    Medium,
    /// Large effect
    Large,
    /// The estimate is undefined (e.g. zero pooled variance)
    Undefined,
}

impl EffectSizeInterpretation {
    /// Get interpretation from magnitude
    ///
    /// All three kinds are on the standard deviation scale, so Cohen's
    /// thresholds for d apply to each of them.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude.is_nan() {
            return Self::Undefined;
        }
        let abs_magnitude = magnitude.abs();
        if abs_magnitude < 0.2 {
            Self::Negligible
        } else if abs_magnitude < 0.5 {
            Self::Small
        } else if abs_magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Undefined => "undefined",
        };
        write!(f, "{}", s)
    }
}
