//! Polars integration for standardized differences
//!
//! [`PolarsDataset`] exposes a `DataFrame` through the [`stddiff_core::Dataset`]
//! trait, and [`BalanceExt`] computes balance tables directly on frames.
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use stddiff_effect::BalanceReport;
//! use stddiff_polars::BalanceExt;
//!
//! let df = df![
//!     "group" => [0, 0, 0, 1, 1, 1],
//!     "age" => [30.0, 35.0, 40.0, 45.0, 50.0, 55.0],
//!     "sex" => ["f", "m", "f", "m", "m", "f"],
//! ]?;
//!
//! let report = BalanceReport::new("group")
//!     .continuous(["age"])
//!     .categorical(["sex"])
//!     .intervals(0.95)?;
//! let balance = df.standardized_differences(&report)?;
//!
//! assert_eq!(balance.shape(), (2, 3));
//! assert!(balance.column("95.0% CI").is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dataset;
mod error;
mod traits;

pub use dataset::PolarsDataset;
pub use error::{Error, Result};
pub use traits::{table_to_frame, BalanceExt};
