//! Error types for configuration problems detected before any line is processed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Padding charset is empty: '{0}' resolves to no characters")]
    EmptyCharset(String),

    #[error("Invalid target length: {0}. Must be greater than 0")]
    InvalidTargetLength(usize),

    #[error("Invalid length range: minimum ({min}) must be <= maximum ({max})")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("Unknown encoding label: '{0}'")]
    UnknownEncoding(String),

    #[error("Invalid size format: '{0}'")]
    InvalidSize(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
