use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "assist")]
    #[error("Assist request failed: {0}")]
    AssistError(String),
}

pub type Result<T> = std::result::Result<T, NarrativeError>;
