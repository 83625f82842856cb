//! Standardized differences for covariate balance
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`stddiff_core`]: datasets, grouping, weighted moments, ranks and errors
//! - [`stddiff_confidence`]: Normal-approximation intervals
//! - [`stddiff_effect`]: continuous, skewed and categorical standardized
//!   differences and the [`BalanceReport`] that combines them
//! - `stddiff_polars` (feature `polars`): the same on Polars DataFrames
//!
//! # Example
//!
//! ```rust
//! use stddiff::prelude::*;
//!
//! let data = Table::new()
//!     .with_column("treated", ColumnData::numeric([0, 0, 0, 0, 1, 1, 1, 1]))?
//!     .with_column("age", ColumnData::numeric([34, 41, 29, 52, 47, 38, 55, 60]))?
//!     .with_column("smoker", ColumnData::levels(["no", "yes", "no", "no", "yes", "yes", "no", "yes"]))?;
//!
//! let table = BalanceReport::new("treated")
//!     .continuous(["age"])
//!     .categorical(["smoker"])
//!     .intervals(0.95)?
//!     .compute(&data)?;
//!
//! for row in &table {
//!     println!("{}: {} {:?}", row.variable, row.estimate(), row.interval());
//! }
//! # Ok::<(), stddiff::Error>(())
//! ```

pub use stddiff_confidence;
pub use stddiff_core;
pub use stddiff_effect;
#[cfg(feature = "polars")]
pub use stddiff_polars;

pub use stddiff_confidence::{
    ConfidenceInterval, ConfidenceLevel, IntervalEstimator, NormalApproximationCI,
};
pub use stddiff_core::{ColumnData, Dataset, Error, Level, Result, Table};
pub use stddiff_effect::{
    compute, BalanceReport, BalanceRow, BalanceTable, CategoricalEffect, ContinuousEffect,
    EffectSize, EffectSizeEstimator, EstimationSettings, FailurePolicy, SkipReason,
    SkippedVariable, VariableKind,
};

/// Commonly used items
pub mod prelude {
    pub use stddiff_confidence::{ConfidenceLevel, IntervalEstimator, NormalApproximationCI};
    pub use stddiff_core::{ColumnData, Dataset, Error, Level, Result, Table};
    pub use stddiff_effect::{
        compute, BalanceReport, BalanceTable, CategoricalEffect, ContinuousEffect,
        EffectSizeEstimator, EstimationSettings, FailurePolicy,
    };
    #[cfg(feature = "polars")]
    pub use stddiff_polars::{BalanceExt, PolarsDataset};
}
