//! Property-based tests for grouping, moments and ranks

use proptest::prelude::*;
use stddiff_core::rank::average_ranks;
use stddiff_core::{ColumnData, Table, WeightedMoments};

fn two_group_table(reference: &[f64], comparison: &[f64]) -> Table {
    let groups: Vec<i32> = reference
        .iter()
        .map(|_| 0)
        .chain(comparison.iter().map(|_| 1))
        .collect();
    let swapped: Vec<i32> = groups.iter().map(|g| 1 - g).collect();
    let values: Vec<f64> = reference.iter().chain(comparison).copied().collect();

    Table::new()
        .with_column("group", ColumnData::numeric(groups))
        .unwrap()
        .with_column("swapped", ColumnData::numeric(swapped))
        .unwrap()
        .with_column("x", ColumnData::numeric(values.clone()))
        .unwrap()
        .with_column("ones", ColumnData::numeric(vec![1.0; values.len()]))
        .unwrap()
}

proptest! {
    // Property: swapping the group coding swaps the moments
    #[test]
    fn prop_swapping_groups_swaps_moments(
        reference in prop::collection::vec(-100.0f64..100.0, 2..40),
        comparison in prop::collection::vec(-100.0f64..100.0, 2..40),
    ) {
        let data = two_group_table(&reference, &comparison);
        let moments = WeightedMoments::compute(&data, "group", "x", None).unwrap();
        let swapped = WeightedMoments::compute(&data, "swapped", "x", None).unwrap();

        prop_assert_eq!(moments.reference, swapped.comparison);
        prop_assert_eq!(moments.comparison, swapped.reference);
        prop_assert_eq!(moments.mean_difference(), -swapped.mean_difference());
    }

    // Property: unit weights reproduce the unweighted moments
    #[test]
    fn prop_unit_weights_are_unweighted(
        reference in prop::collection::vec(-100.0f64..100.0, 2..40),
        comparison in prop::collection::vec(-100.0f64..100.0, 2..40),
    ) {
        let data = two_group_table(&reference, &comparison);
        let plain = WeightedMoments::compute(&data, "group", "x", None).unwrap();
        let unit = WeightedMoments::compute(&data, "group", "x", Some("ones")).unwrap();
        prop_assert_eq!(plain, unit);
    }

    // Property: variances are never negative
    #[test]
    fn prop_variance_non_negative(
        reference in prop::collection::vec(-1e3f64..1e3, 2..40),
        comparison in prop::collection::vec(-1e3f64..1e3, 2..40),
    ) {
        let data = two_group_table(&reference, &comparison);
        let moments = WeightedMoments::compute(&data, "group", "x", None).unwrap();
        prop_assert!(moments.reference.variance >= 0.0);
        prop_assert!(moments.comparison.variance >= 0.0);
    }

    // Property: ranks of n values sum to n(n+1)/2, ties included
    #[test]
    fn prop_rank_sum(values in prop::collection::vec(0i32..10, 0..60)) {
        let cells: Vec<Option<f64>> = values.iter().map(|&v| Some(f64::from(v))).collect();
        let ranks = average_ranks(&cells);
        let n = values.len() as f64;
        let total: f64 = ranks.iter().map(|r| r.unwrap()).sum();
        prop_assert!((total - n * (n + 1.0) / 2.0).abs() < 1e-9);
    }
}
