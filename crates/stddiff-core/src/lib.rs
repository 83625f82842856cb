//! Core types for standardized difference computations
//!
//! This crate provides the pieces every effect-size computation in the
//! workspace is built from:
//!
//! - [`Dataset`]: read-only column access over a labeled table, with an
//!   in-memory [`Table`] implementation
//! - [`grouping`]: missing-row filtering and the split into group `0` and
//!   group `1`, looked up by value
//! - [`WeightedMoments`]: per-group mean and unbiased variance, optionally
//!   frequency weighted
//! - [`rank::average_ranks`]: the tie-averaged rank transform used for skewed
//!   variables
//! - [`numeric::round_to`]: rounding of reported values
//!
//! # Example
//!
//! ```rust
//! use stddiff_core::{ColumnData, Table, WeightedMoments};
//!
//! let data = Table::new()
//!     .with_column("group", ColumnData::numeric([0, 0, 0, 1, 1, 1]))?
//!     .with_column("age", ColumnData::numeric([30.0, 35.0, 40.0, 45.0, 50.0, 55.0]))?;
//!
//! let moments = WeightedMoments::compute(&data, "group", "age", None)?;
//! assert_eq!(moments.mean_difference(), 15.0);
//! # Ok::<(), stddiff_core::Error>(())
//! ```

pub mod dataset;
pub mod error;
pub mod grouping;
pub mod moments;
pub mod numeric;
pub mod rank;
pub mod utils;

// Re-export core types
pub use dataset::{ColumnData, Dataset, Level, Table};
pub use error::{Error, Result};
pub use grouping::{GroupLabel, GroupSample, GroupSizes, TwoGroups};
pub use moments::{GroupMoments, WeightedMoments};
