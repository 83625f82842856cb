//! Common test utilities for stddiff-effect tests

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Bernoulli, Exp, Normal};
use stddiff_core::{ColumnData, Table};

pub const SAMPLE_SIZE: usize = 100;

/// Two groups of [`SAMPLE_SIZE`] observations with one variable of each kind
///
/// - `var1`: N(1.0, 0.7) vs N(1.2, 0.9)
/// - `var2`: Exp(3) vs Exp(4)
/// - `var3`: Bernoulli(0.2) vs Bernoulli(0.4)
/// - `var4`: levels 1..=3 with probabilities (2/9, 4/9, 3/9) vs (0.3, 0.4, 0.3)
/// - `group`: 0 for the first half, 1 for the second
/// - `wgt`: N(100, 15) frequency weights from an independent stream
pub fn simulated_table(seed: u64) -> Table {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut gaussian = sample_n(&mut rng, Normal::new(1.0, 0.7).unwrap());
    gaussian.extend(sample_n(&mut rng, Normal::new(1.2, 0.9).unwrap()));

    let mut exponential = sample_n(&mut rng, Exp::new(3.0).unwrap());
    exponential.extend(sample_n(&mut rng, Exp::new(4.0).unwrap()));

    let mut binomial: Vec<i64> = sample_n(&mut rng, Bernoulli::new(0.2).unwrap())
        .into_iter()
        .map(i64::from)
        .collect();
    binomial.extend(
        sample_n(&mut rng, Bernoulli::new(0.4).unwrap())
            .into_iter()
            .map(i64::from),
    );

    let mut multinomial: Vec<i64> =
        sample_n(&mut rng, WeightedIndex::new([2.0 / 9.0, 4.0 / 9.0, 3.0 / 9.0]).unwrap())
            .into_iter()
            .map(|i| i as i64 + 1)
            .collect();
    multinomial.extend(
        sample_n(&mut rng, WeightedIndex::new([0.3, 0.4, 0.3]).unwrap())
            .into_iter()
            .map(|i| i as i64 + 1),
    );

    let group: Vec<i64> = (0..2 * SAMPLE_SIZE)
        .map(|i| i64::from(i >= SAMPLE_SIZE))
        .collect();

    let mut weight_rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..2 * SAMPLE_SIZE)
        .map(|_| weight_rng.sample(Normal::new(100.0, 15.0).unwrap()))
        .collect();

    Table::new()
        .with_column("var1", ColumnData::numeric(gaussian))
        .unwrap()
        .with_column("var2", ColumnData::numeric(exponential))
        .unwrap()
        .with_column("var3", ColumnData::numeric(binomial))
        .unwrap()
        .with_column("var4", ColumnData::numeric(multinomial))
        .unwrap()
        .with_column("group", ColumnData::numeric(group))
        .unwrap()
        .with_column("wgt", ColumnData::numeric(weights))
        .unwrap()
}

fn sample_n<T, D: Distribution<T>>(rng: &mut ChaCha8Rng, dist: D) -> Vec<T> {
    (0..SAMPLE_SIZE).map(|_| rng.sample(&dist)).collect()
}
