//! Error types for record parsing and whole-run processing.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// A single packet record could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no field {index} ({field})")]
    MissingField { index: usize, field: &'static str },

    #[error("field {index} ({field}) is not a valid number: {value:?}: {source}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors that abort a processing run.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl ProcessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }
}
