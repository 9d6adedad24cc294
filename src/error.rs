// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, filtering or aggregating event data.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not find a header row containing {expected:?} in '{path}'")]
    HeaderNotFound { path: PathBuf, expected: Vec<String> },

    #[error("missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("no records left after applying the selection")]
    EmptySelection,

    #[error("date range {start} to {end} contains no complete calendar month")]
    NoCompleteMonth { start: String, end: String },

    #[error(
        "must have more than one year of data for each season: month {month} covers {years} year(s)"
    )]
    InsufficientYears { month: u32, years: usize },

    #[error("attribute '{attribute}' differs between x ('{x}') and y ('{y}') data")]
    AttributeMismatch {
        attribute: String,
        x: String,
        y: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        AnalysisError::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
