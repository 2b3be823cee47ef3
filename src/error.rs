use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// Failure to build a [`RecordStore`](crate::data::model::RecordStore).
///
/// Always fatal at start-up; there is no partially loaded store.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow conversion failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Rejected dashboard parameters. The core never clamps or guesses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("unknown launch site '{0}'")]
    InvalidSelector(String),

    #[error("payload range [{low}, {high}] is not a valid interval within [{min}, {max}]")]
    InvalidRange {
        low: f64,
        high: f64,
        min: f64,
        max: f64,
    },
}
