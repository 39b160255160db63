//! Pipeline error taxonomy. A failure anywhere in a batch aborts that batch;
//! the previously published snapshot stays current.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or unreadable input file.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tabular input: missing columns, bad row shape, empty
    /// required fields.
    #[error("malformed input: {0}")]
    Input(String),

    /// A timestamp field that neither RFC 3339 nor the naive log format
    /// could parse.
    #[error("unparseable timestamp {value:?}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The statistical labeler was handed a feature matrix it cannot fit
    /// (e.g. zero rows).
    #[error("labeler rejected feature matrix: {0}")]
    Model(String),
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Input(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
