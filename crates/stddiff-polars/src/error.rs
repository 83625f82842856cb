//! Error types for stddiff-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Balance computation error: {0}")]
    Stddiff(#[from] stddiff_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
