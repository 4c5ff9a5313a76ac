//! Error types for loading and querying truth tables.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruthTableError {
    /// The expression cannot be reduced to a single bit.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// A row was requested outside of `0..rows`.
    #[error("row index {index} out of range (table has {rows} rows)")]
    RowIndexOutOfRange { index: usize, rows: usize },

    /// The expression would produce a table larger than the configured limit.
    #[error("expression has {count} variables, at most {max} are allowed")]
    TooManyVariables { count: usize, max: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TruthTableError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedExpression(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, TruthTableError>;
