use thiserror::Error;

/// Reasons normalized input is refused before any model is involved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input text is too short. Summary may not be meaningful.")]
    TooShort,

    #[error("Input text is too long. Consider breaking it into smaller chunks.")]
    TooLong,

    #[error("Text exceeds model's token limit. Please shorten the input.")]
    TooLarge,

    #[error("Minimum length ({min_length}) cannot exceed maximum length ({max_length}).")]
    InvalidLengths { min_length: usize, max_length: usize },

    #[error("{parameter} must be between {range}.")]
    OutOfRange {
        parameter: &'static str,
        range: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
