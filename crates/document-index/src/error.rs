use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentIndexError>;

#[derive(Error, Debug)]
pub enum DocumentIndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid chunker configuration: {0}")]
    InvalidConfig(String),

    #[error("Document is empty: {0}")]
    EmptyDocument(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
