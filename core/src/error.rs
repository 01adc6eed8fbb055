use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column lengths are inconsistent")]
    LengthMismatch,
    #[error("unsupported timestamp at row {row}: {value}")]
    UnsupportedTimestamp { row: usize, value: String },
    #[error("invalid numeric value in column '{column}' at row {row}: {value}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
    #[error("series '{series}' is not strictly increasing at row {row}")]
    UnorderedSeries { series: String, row: usize },
    #[error("series '{series}' value {value} at row {row} is outside [0, 1]")]
    ValueOutOfRange {
        series: String,
        row: usize,
        value: f64,
    },
    #[error("could not determine series format for {0} (use json, csv or parquet)")]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("unparseable date '{0}'")]
    Unparseable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color '{0}' (expected #rrggbb or rgb(r, g, b))")]
    Invalid(String),
}
