//! Read-only access to two-dimensional labeled data
//!
//! The computations in this workspace never own or mutate the caller's data.
//! They only need to pull named columns out of a table, either as numbers or
//! as categorical levels, and do all filtering and grouping on copies. The
//! [`Dataset`] trait captures exactly that. [`Table`] is a small in-memory
//! implementation; `stddiff-polars` implements it for polars `DataFrame`s.

use crate::{Error, Result};
use num_traits::ToPrimitive;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single categorical value
///
/// Levels are totally ordered (variant first, then value), which gives every
/// categorical variable a fixed, reproducible level order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Bool(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Level {
    /// Convert a numeric cell to a level
    ///
    /// Integral values become [`Level::Integer`] so that `1.0` and `1` land
    /// on the same level. NaN is not a level.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(Self::Integer(value as i64))
        } else {
            Some(Self::Float(OrderedFloat(value)))
        }
    }

    /// Numeric view of the level, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(f.into_inner()),
            Self::Text(_) => None,
        }
    }

    /// Short name of the level kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{}", x.into_inner()),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Level {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Read-only column access over a labeled table
///
/// Missing cells are `None`. Implementations may also return `NaN` for a
/// missing float; every consumer in this workspace treats `NaN` as missing.
pub trait Dataset {
    /// Column names in the table's native order
    fn column_names(&self) -> Vec<String>;

    /// Number of rows (observations)
    fn n_rows(&self) -> usize;

    /// Whether a column with this name exists
    fn has_column(&self, name: &str) -> bool {
        self.column_names().iter().any(|c| c == name)
    }

    /// Read a column as numbers
    fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>>;

    /// Read a column as categorical levels
    fn level_column(&self, name: &str) -> Result<Vec<Option<Level>>>;
}

impl<D: Dataset + ?Sized> Dataset for &D {
    fn column_names(&self) -> Vec<String> {
        (**self).column_names()
    }

    fn n_rows(&self) -> usize {
        (**self).n_rows()
    }

    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        (**self).numeric_column(name)
    }

    fn level_column(&self, name: &str) -> Result<Vec<Option<Level>>> {
        (**self).level_column(name)
    }
}

/// Storage of a single [`Table`] column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<Level>>),
}

impl ColumnData {
    /// Numeric column without missing cells
    pub fn numeric<T: ToPrimitive>(values: impl IntoIterator<Item = T>) -> Self {
        Self::Numeric(values.into_iter().map(|v| v.to_f64()).collect())
    }

    /// Numeric column where `None` marks a missing cell
    pub fn numeric_opt<T: ToPrimitive>(values: impl IntoIterator<Item = Option<T>>) -> Self {
        Self::Numeric(
            values
                .into_iter()
                .map(|v| v.and_then(|x| x.to_f64()))
                .collect(),
        )
    }

    /// Categorical column without missing cells
    pub fn levels<L: Into<Level>>(values: impl IntoIterator<Item = L>) -> Self {
        Self::Categorical(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Categorical column where `None` marks a missing cell
    pub fn levels_opt<L: Into<Level>>(values: impl IntoIterator<Item = Option<L>>) -> Self {
        Self::Categorical(values.into_iter().map(|v| v.map(Into::into)).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Minimal in-memory table
///
/// Columns keep their insertion order, which is the order reported by
/// [`Dataset::column_names`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<ColumnData>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, checking the name is unique and the length matches
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(Error::InvalidInput(format!("Duplicate column name '{name}'")));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != data.len() {
                return Err(Error::size_mismatch(
                    first.len(),
                    data.len(),
                    &format!("column '{name}'"),
                ));
            }
        }
        self.names.push(name);
        self.columns.push(data);
        Ok(())
    }

    /// Builder form of [`Table::push_column`]
    pub fn with_column(mut self, name: impl Into<String>, data: ColumnData) -> Result<Self> {
        self.push_column(name, data)?;
        Ok(self)
    }

    fn column(&self, name: &str) -> Result<&ColumnData> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }
}

impl Dataset for Table {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, ColumnData::len)
    }

    fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        match self.column(name)? {
            ColumnData::Numeric(values) => Ok(values.clone()),
            ColumnData::Categorical(levels) => levels
                .iter()
                .map(|cell| match cell {
                    None => Ok(None),
                    Some(level) => level.as_f64().map(Some).ok_or_else(|| Error::TypeMismatch {
                        column: name.to_string(),
                        expected: "numeric".to_string(),
                        got: level.kind().to_string(),
                    }),
                })
                .collect(),
        }
    }

    fn level_column(&self, name: &str) -> Result<Vec<Option<Level>>> {
        match self.column(name)? {
            ColumnData::Categorical(levels) => Ok(levels.clone()),
            ColumnData::Numeric(values) => Ok(values
                .iter()
                .map(|&v| v.and_then(Level::from_f64))
                .collect()),
        }
    }
}
