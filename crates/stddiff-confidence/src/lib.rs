//! Confidence intervals for standardized differences
//!
//! A standardized difference is reported with a symmetric, Normal-theory
//! interval whose width depends only on the estimate and the (weighted)
//! group sizes. The [`IntervalEstimator`] trait is the seam between effect
//! computations and interval construction; [`NormalApproximationCI`] is the
//! implementation used throughout the workspace.
//!
//! # Example
//!
//! ```rust
//! use stddiff_confidence::{ConfidenceLevel, IntervalEstimator, NormalApproximationCI};
//! use stddiff_core::GroupSizes;
//!
//! let estimator = NormalApproximationCI::new(ConfidenceLevel::NINETY_FIVE);
//! let sizes = GroupSizes { reference: 100.0, comparison: 100.0 };
//! let ci = estimator.interval_from_sizes(0.18, sizes, 2)?;
//! assert!(ci.lower < 0.18 && ci.upper > 0.18);
//! # Ok::<(), stddiff_core::Error>(())
//! ```

mod asymptotic;
mod traits;
mod types;

// Re-exports
pub use asymptotic::NormalApproximationCI;
pub use traits::IntervalEstimator;
pub use types::{ConfidenceInterval, ConfidenceLevel};
