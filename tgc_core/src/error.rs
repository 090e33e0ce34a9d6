//! Errors raised while reading a pickup schedule.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a schedule conversion.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The schedule file could not be opened.
    #[error("could not open schedule {path}: {source}")]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reserved column is absent from the header row.
    #[error("required column '{column}' not found in schedule header")]
    MissingColumn { column: &'static str },

    /// The week start is not a `MM/DD/YYYY` date.
    #[error("malformed week start '{value}', expected MM/DD/YYYY: {source}")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A pickup column holds neither `0` nor a known day code.
    #[error("unknown day code '{code}' for {pickup}")]
    UnknownDayCode { pickup: String, code: String },

    /// The CSV itself is unreadable, e.g. a row with a different number of fields.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
