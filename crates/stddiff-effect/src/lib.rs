//! Standardized differences for covariate balance
//!
//! This crate computes standardized differences ("effect sizes") between
//! group `1` and group `0` of a dataset, for mixed sets of variables:
//!
//! - **Continuous**: difference in means over the pooled standard deviation
//!   ([`ContinuousEffect`])
//! - **Skewed continuous**: the same on average ranks
//!   ([`ContinuousEffect::skewed`])
//! - **Categorical**: Mahalanobis distance between level-proportion vectors
//!   ([`CategoricalEffect`])
//!
//! Every estimate can be frequency weighted and reported with a
//! Normal-approximation confidence interval. [`BalanceReport`] (or the
//! [`compute`] function) runs the right estimator for each variable and
//! collects the results into a [`BalanceTable`].
//!
//! # Example
//!
//! ```rust
//! use stddiff_core::{ColumnData, Table};
//! use stddiff_effect::compute;
//!
//! let data = Table::new()
//!     .with_column("group", ColumnData::numeric([0, 0, 0, 0, 0, 1, 1, 1, 1, 1]))?
//!     .with_column("x", ColumnData::numeric([1, 2, 3, 4, 5, 3, 4, 5, 6, 7]))?;
//!
//! let table = compute(&data, "group", &["x"], &[], &[], None, 2, None)?;
//! assert_eq!(table.get("x").map(|row| row.estimate()), Some(1.26));
//! # Ok::<(), stddiff_core::Error>(())
//! ```

pub mod categorical;
pub mod config;
pub mod continuous;
pub mod report;
pub mod traits;
pub mod types;

// Re-export main types
pub use categorical::{CategoricalEffect, LevelProportions};
pub use config::{EstimationSettings, FailurePolicy};
pub use continuous::{standardized_mean_difference, ContinuousEffect};
pub use report::{
    compute, BalanceReport, BalanceRow, BalanceTable, MaybeSync, SkipReason, SkippedVariable,
    VariableKind,
};
pub use traits::{EffectSizeEstimator, PointEstimate};
pub use types::{EffectSize, EffectSizeInterpretation, EffectSizeType};
