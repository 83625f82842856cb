//! Balance tables on Polars DataFrames

use crate::{PolarsDataset, Result};
use polars::prelude::*;
use stddiff_effect::{BalanceReport, BalanceTable};

/// Extension trait for standardized differences on Polars DataFrames
pub trait BalanceExt {
    /// Compute a balance table
    ///
    /// # Arguments
    /// * `report` - Group column, variables and estimation settings
    ///
    /// # Returns
    /// The typed table, including diagnostics for skipped variables
    fn balance_table(&self, report: &BalanceReport) -> Result<BalanceTable>;

    /// Compute a balance table as a DataFrame
    ///
    /// # Returns
    /// DataFrame with a `variable` column, an `ES` column and, when intervals
    /// are requested, a `"<coverage>% CI"` list column holding `[lower, upper]`
    fn standardized_differences(&self, report: &BalanceReport) -> Result<DataFrame> {
        let table = self.balance_table(report)?;
        table_to_frame(&table)
    }
}

impl BalanceExt for DataFrame {
    fn balance_table(&self, report: &BalanceReport) -> Result<BalanceTable> {
        Ok(report.compute(&PolarsDataset::new(self))?)
    }
}

/// Lay a [`BalanceTable`] out as a DataFrame, one row per variable
pub fn table_to_frame(table: &BalanceTable) -> Result<DataFrame> {
    let labels = table.column_labels();

    let variables: Vec<&str> = table.variables();
    let estimates: Vec<f64> = table.iter().map(|row| row.estimate()).collect();

    let mut columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from("variable"), variables).into(),
        Series::new(PlSmallStr::from(labels[0].as_str()), estimates).into(),
    ];

    if let Some(label) = labels.get(1) {
        let intervals: ListChunked = table
            .iter()
            .map(|row| {
                row.interval()
                    .map(|bounds| Series::new(PlSmallStr::EMPTY, bounds.to_vec()))
            })
            .collect();
        columns.push(
            intervals
                .into_series()
                .with_name(PlSmallStr::from(label.as_str()))
                .into(),
        );
    }

    Ok(DataFrame::new(columns)?)
}
