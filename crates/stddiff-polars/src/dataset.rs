//! Column access over polars `DataFrame`s

use polars::prelude::*;
use stddiff_core::{Dataset, Level};

/// Read-only [`Dataset`] view of a `DataFrame`
///
/// Nulls and float `NaN`s are missing. Integer, float and boolean columns
/// read as numbers; any column polars can cast to a string reads as levels.
#[derive(Debug, Clone, Copy)]
pub struct PolarsDataset<'a> {
    frame: &'a DataFrame,
}

impl<'a> PolarsDataset<'a> {
    pub fn new(frame: &'a DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    fn column(&self, name: &str) -> stddiff_core::Result<&'a Column> {
        self.frame
            .column(name)
            .map_err(|_| stddiff_core::Error::UnknownColumn(name.to_string()))
    }
}

impl<'a> From<&'a DataFrame> for PolarsDataset<'a> {
    fn from(frame: &'a DataFrame) -> Self {
        Self::new(frame)
    }
}

fn polars_error(error: PolarsError) -> stddiff_core::Error {
    stddiff_core::Error::Other(anyhow::Error::from(error))
}

fn type_mismatch(name: &str, expected: &str, dtype: &DataType) -> stddiff_core::Error {
    stddiff_core::Error::TypeMismatch {
        column: name.to_string(),
        expected: expected.to_string(),
        got: format!("{:?}", dtype),
    }
}

impl Dataset for PolarsDataset<'_> {
    fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn n_rows(&self) -> usize {
        self.frame.height()
    }

    fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    fn numeric_column(&self, name: &str) -> stddiff_core::Result<Vec<Option<f64>>> {
        let column = self.column(name)?;
        let dtype = column.dtype();
        if !(dtype.is_float() || dtype.is_integer() || dtype.is_bool()) {
            return Err(type_mismatch(name, "numeric", dtype));
        }

        let floats = column.cast(&DataType::Float64).map_err(polars_error)?;
        let values = floats
            .f64()
            .map_err(polars_error)?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    fn level_column(&self, name: &str) -> stddiff_core::Result<Vec<Option<Level>>> {
        let column = self.column(name)?;
        let dtype = column.dtype();

        if dtype.is_bool() {
            let values = column.bool().map_err(polars_error)?;
            return Ok(values.into_iter().map(|v| v.map(Level::Bool)).collect());
        }
        if dtype.is_integer() {
            let ints = column.cast(&DataType::Int64).map_err(polars_error)?;
            let values = ints.i64().map_err(polars_error)?;
            return Ok(values.into_iter().map(|v| v.map(Level::Integer)).collect());
        }
        if dtype.is_float() {
            let floats = column.cast(&DataType::Float64).map_err(polars_error)?;
            let values = floats.f64().map_err(polars_error)?;
            return Ok(values
                .into_iter()
                .map(|v| v.and_then(Level::from_f64))
                .collect());
        }

        let strings = column
            .cast(&DataType::String)
            .map_err(|_| type_mismatch(name, "categorical", dtype))?;
        let values = strings.str().map_err(polars_error)?;
        Ok(values
            .into_iter()
            .map(|v| v.map(|s| Level::Text(s.to_string())))
            .collect())
    }
}
