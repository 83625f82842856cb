//! Balance tables on seeded synthetic data

mod common;

use approx::assert_relative_eq;
use common::{simulated_table, SAMPLE_SIZE};
use stddiff_confidence::{ConfidenceLevel, IntervalEstimator, NormalApproximationCI};
use stddiff_core::numeric::round_to;
use stddiff_core::{ColumnData, Dataset, GroupSizes, Table};
use stddiff_effect::{
    BalanceReport, CategoricalEffect, ContinuousEffect, EffectSizeEstimator, VariableKind,
};

fn full_report() -> BalanceReport {
    BalanceReport::new("group")
        .continuous(["var1", "var2"])
        .categorical(["var3", "var4"])
        .skewed(["var2"])
}

#[test]
fn test_mixed_variables_in_column_order() {
    let data = simulated_table(1234);
    let table = BalanceReport::new("group")
        .categorical(["var4", "var3"])
        .continuous(["var2", "var1"])
        .skewed(["var2"])
        .compute(&data)
        .unwrap();

    assert_eq!(table.variables(), vec!["var1", "var2", "var3", "var4"]);
    let kinds: Vec<VariableKind> = table.iter().map(|row| row.kind).collect();
    assert_eq!(
        kinds,
        vec![
            VariableKind::Continuous,
            VariableKind::Skewed,
            VariableKind::Categorical,
            VariableKind::Categorical
        ]
    );
    for row in &table {
        assert_eq!(row.effect.sample_sizes, Some((SAMPLE_SIZE, SAMPLE_SIZE)));
    }
}

/// `(group, value, weight)` triples of the rows with every cell present
fn complete_rows(data: &Table, variable: &str, weights: Option<&str>) -> Vec<(f64, f64, f64)> {
    let group = data.numeric_column("group").unwrap();
    let values = data.numeric_column(variable).unwrap();
    let weights = weights.map(|w| data.numeric_column(w).unwrap());
    (0..data.n_rows())
        .filter_map(|i| {
            let w = match &weights {
                Some(column) => column[i]?,
                None => 1.0,
            };
            Some((group[i]?, values[i]?, w))
        })
        .collect()
}

/// Frequency-weighted mean, unbiased variance and weight sum of one group
fn group_moments(rows: &[(f64, f64, f64)], label: f64) -> (f64, f64, f64) {
    let members: Vec<(f64, f64)> = rows
        .iter()
        .filter(|(g, _, _)| *g == label)
        .map(|&(_, x, w)| (x, w))
        .collect();
    let total: f64 = members.iter().map(|(_, w)| w).sum();
    let mean = members.iter().map(|(x, w)| x * w).sum::<f64>() / total;
    let variance = members
        .iter()
        .map(|(x, w)| w * (x - mean).powi(2))
        .sum::<f64>()
        / (total - 1.0);
    (mean, variance, total)
}

fn smd_from_rows(rows: &[(f64, f64, f64)]) -> (f64, GroupSizes) {
    let (m0, v0, n0) = group_moments(rows, 0.0);
    let (m1, v1, n1) = group_moments(rows, 1.0);
    let sizes = GroupSizes {
        reference: n0,
        comparison: n1,
    };
    ((m1 - m0) / ((v0 + v1) / 2.0).sqrt(), sizes)
}

#[test]
fn test_normal_shift_seeded_values() {
    // Population value 0.2 / sqrt((0.49 + 0.81) / 2) ≈ 0.25.
    for (seed, expected) in [
        (1234, 0.3100402555777838),
        (42, 0.24056896638349493),
        (7, 0.38615235507820606),
    ] {
        let data = simulated_table(seed);
        let point = ContinuousEffect::new()
            .point_estimate(&data, "group", "var1", None)
            .unwrap();
        assert_relative_eq!(point.value, expected, epsilon = 1e-12);

        let (direct, _) = smd_from_rows(&complete_rows(&data, "var1", None));
        assert_relative_eq!(point.value, direct, epsilon = 1e-12);
    }
}

#[test]
fn test_weighted_interval_matches_direct_computation() {
    let data = simulated_table(1234);
    let table = BalanceReport::new("group")
        .continuous(["var1"])
        .weights("wgt")
        .intervals(0.95)
        .unwrap()
        .compute(&data)
        .unwrap();
    let row = table.get("var1").unwrap();

    let (direct, sizes) = smd_from_rows(&complete_rows(&data, "var1", Some("wgt")));
    let rounded = round_to(direct, 2);
    assert_eq!(row.estimate(), rounded);

    let expected = NormalApproximationCI::new(ConfidenceLevel::NINETY_FIVE)
        .interval_from_sizes(rounded, sizes, 2)
        .unwrap();
    assert_eq!(row.interval(), Some(expected.bounds()));
    // Weight sums near 100 * 100, far from the row counts.
    assert!(sizes.reference > 5000.0 && sizes.comparison > 5000.0);
}

#[test]
fn test_binary_variable_continuous_vs_categorical() {
    // With n - 1 variances the continuous formula is the categorical one
    // scaled by sqrt((n - 1) / n).
    let data = simulated_table(1234);
    let continuous = ContinuousEffect::new()
        .point_estimate(&data, "group", "var3", None)
        .unwrap();
    let categorical = CategoricalEffect::new()
        .point_estimate(&data, "group", "var3", None)
        .unwrap();
    let n = SAMPLE_SIZE as f64;
    assert_relative_eq!(
        continuous.value.abs(),
        categorical.value * ((n - 1.0) / n).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_intervals_contain_estimates() {
    let data = simulated_table(1234);
    let table = full_report().intervals(0.95).unwrap().compute(&data).unwrap();
    assert_eq!(table.column_labels(), vec!["ES", "95.0% CI"]);

    for row in &table {
        let [lower, upper] = row.interval().unwrap();
        assert!(lower <= row.estimate() && row.estimate() <= upper, "{}", row.variable);
        // Half-widths of 200 observations are around 0.28.
        assert!(upper - lower > 0.4 && upper - lower < 0.7, "{}", row.variable);
    }
}

#[test]
fn test_weighted_report() {
    let data = simulated_table(1234);
    let plain = full_report().compute(&data).unwrap();
    let weighted = full_report().weights("wgt").compute(&data).unwrap();
    assert_eq!(plain.variables(), weighted.variables());
    for (a, b) in plain.iter().zip(&weighted) {
        assert!((a.estimate() - b.estimate()).abs() < 0.3, "{}", a.variable);
    }
}

#[test]
fn test_unit_weights_match_unweighted() {
    let mut data = simulated_table(99);
    data.push_column("ones", ColumnData::numeric(vec![1.0; data.n_rows()]))
        .unwrap();
    let plain = full_report().decimals(10).compute(&data).unwrap();
    let unit = full_report()
        .decimals(10)
        .weights("ones")
        .compute(&data)
        .unwrap();
    for (a, b) in plain.iter().zip(&unit) {
        assert_relative_eq!(a.estimate(), b.estimate(), epsilon = 1e-9);
    }
}

#[test]
fn test_more_decimals_round_consistently() {
    let data = simulated_table(1234);
    let coarse = full_report().decimals(2).compute(&data).unwrap();
    let fine = full_report().decimals(4).compute(&data).unwrap();
    for (c, f) in coarse.iter().zip(&fine) {
        assert!((round_to(f.estimate(), 2) - c.estimate()).abs() <= 0.01 + 1e-12);
        assert!((f.estimate() - c.estimate()).abs() <= 0.0051);
    }
}

#[test]
fn test_skewed_invariant_under_log() {
    let data = simulated_table(1234);
    let logged: Vec<Option<f64>> = data
        .numeric_column("var2")
        .unwrap()
        .into_iter()
        .map(|v| v.map(f64::ln))
        .collect();
    let mut data = data;
    data.push_column("log_var2", ColumnData::Numeric(logged)).unwrap();

    let table = BalanceReport::new("group")
        .continuous(["var2", "log_var2"])
        .skewed(["var2", "log_var2"])
        .decimals(12)
        .compute(&data)
        .unwrap();
    assert_eq!(
        table.get("var2").unwrap().estimate(),
        table.get("log_var2").unwrap().estimate()
    );
}

#[test]
fn test_missing_values_are_dropped() {
    let data = Table::new()
        .with_column("group", ColumnData::numeric_opt([Some(0), Some(0), Some(0), Some(1), Some(1), Some(1), None]))
        .unwrap()
        .with_column(
            "x",
            ColumnData::numeric_opt([Some(1.0), Some(2.0), Some(3.0), Some(2.0), None, Some(4.0), Some(9.0)]),
        )
        .unwrap();
    let table = BalanceReport::new("group")
        .continuous(["x"])
        .compute(&data)
        .unwrap();
    let row = table.get("x").unwrap();
    // Means 2 and 3, variances 1 and 2.
    assert_eq!(row.estimate(), round_to(1.0 / 1.5_f64.sqrt(), 2));
    assert_eq!(row.effect.sample_sizes, Some((3, 2)));
}
