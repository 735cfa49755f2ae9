use std::path::PathBuf;

use thiserror::Error;

/// The input does not have the shape an employee dataset needs.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    ColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Everything that can go wrong between a file on disk and a cleaned table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("income quartiles need at least {required} records, found {found}")]
    InsufficientData { required: usize, found: usize },
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
