use crate::embeddings::ProviderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
