//! Error types for input collection and decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Errors that can occur while collecting or decoding input documents.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Cannot read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input data cannot be empty")]
    EmptyInput,

    #[error("YAML decoding error: {0}")]
    Decode(#[from] serde_yaml::Error),
}
