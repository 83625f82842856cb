//! Common test utilities for stddiff-polars tests

use polars::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp, Normal};

/// Two groups of `n` rows: a normal shift, an exponential and a three-level category
pub fn create_test_df(n: usize, seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal0 = Normal::new(1.0, 0.7).unwrap();
    let normal1 = Normal::new(1.2, 0.9).unwrap();
    let exp = Exp::new(3.0).unwrap();
    let regions = ["north", "south", "west"];

    let group: Vec<i32> = (0..2 * n).map(|i| i32::from(i >= n)).collect();
    let var1: Vec<f64> = (0..2 * n)
        .map(|i| if i < n { rng.sample(normal0) } else { rng.sample(normal1) })
        .collect();
    let var2: Vec<f64> = (0..2 * n).map(|_| rng.sample(exp)).collect();
    let region: Vec<&str> = (0..2 * n).map(|_| regions[rng.gen_range(0..3)]).collect();
    let wgt: Vec<f64> = (0..2 * n).map(|_| rng.gen_range(50.0..150.0)).collect();

    df![
        "var1" => var1,
        "group" => group,
        "var2" => var2,
        "region" => region,
        "wgt" => wgt,
    ]
    .unwrap()
}

/// Helper function to extract the `ES` value of a variable
pub fn extract_estimate(df: &DataFrame, variable: &str) -> f64 {
    let names = df.column("variable").unwrap().str().unwrap();
    let row = names
        .into_iter()
        .position(|name| name == Some(variable))
        .unwrap();
    df.column("ES").unwrap().f64().unwrap().get(row).unwrap()
}
