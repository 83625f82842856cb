//! Small helpers for variable lists

/// Items of `order` that also appear in `keep`, in the order of `order`
///
/// Used to put requested variables into the dataset's native column order.
///
/// # Examples
///
/// ```rust
/// use stddiff_core::utils::ordered_intersection;
///
/// let columns = ["apple", "banana", "cat", "dog"];
/// let wanted = ["dog", "banana", "elephant"];
/// assert_eq!(ordered_intersection(&columns, &wanted), vec!["banana", "dog"]);
/// ```
pub fn ordered_intersection<T, U>(order: &[T], keep: &[U]) -> Vec<T>
where
    T: PartialEq<U> + Clone,
{
    order
        .iter()
        .filter(|item| keep.iter().any(|k| *item == k))
        .cloned()
        .collect()
}
