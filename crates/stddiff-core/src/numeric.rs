//! Rounding of reported values

/// Round to a number of decimal places, ties to even
///
/// Scales by `10^decimals`, rounds half to even and scales back, the same
/// rule used by NumPy's `round`. Non-finite values pass through unchanged,
/// as do values whose scaled form overflows.
///
/// # Examples
///
/// ```rust
/// use stddiff_core::numeric::round_to;
///
/// assert_eq!(round_to(0.18475, 2), 0.18);
/// assert_eq!(round_to(2.5, 0), 2.0);
/// assert!(round_to(f64::NAN, 2).is_nan());
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || !factor.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}
