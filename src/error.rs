use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Per-field serialization problems never show up here; the safe serializer
/// absorbs them and emits a placeholder cell instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Invalid configuration (batch size, delimiter, missing input, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure while reading input or preparing the output directory
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid for its declared format
    #[error("failed to parse {format} input: {message}")]
    Parse { format: String, message: String },

    /// The input parsed but is not shaped like an OpenAPI document
    #[error("invalid document: {0}")]
    Document(String),

    /// Writing rows to the output sink failed
    #[error("failed to write rows: {0}")]
    Sink(#[from] csv::Error),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Sink(csv::Error::from(err))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
