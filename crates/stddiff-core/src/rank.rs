//! Average-rank transform for skewed variables

/// Ascending ranks, ties sharing the mean of the ranks they span
///
/// Ranks start at 1. Missing (`None` or `NaN`) cells are not ranked and stay
/// missing, so positions line up with the input.
///
/// # Examples
///
/// ```rust
/// use stddiff_core::rank::average_ranks;
///
/// let ranks = average_ranks(&[Some(10.0), None, Some(5.0), Some(10.0)]);
/// assert_eq!(ranks, vec![Some(2.5), None, Some(1.0), Some(2.5)]);
/// ```
pub fn average_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && order[end + 1].1 == order[start].1 {
            end += 1;
        }
        // Positions start..=end hold ranks start+1..=end+1.
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &(index, _) in &order[start..=end] {
            ranks[index] = Some(rank);
        }
        start = end + 1;
    }
    ranks
}
