use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The probing question is too short to retrieve against.
    /// Recoverable: callers skip the topic rather than abort the run.
    #[error("Query too short to retrieve against (minimum 10 characters)")]
    InvalidQuery,

    /// Document loading or embedding failed. Fatal to the current run.
    #[error("Index error: {0}")]
    Index(#[from] reggap_document_index::DocumentIndexError),

    /// The chat collaborator failed. Fatal to the current run.
    #[error("LLM error: {0}")]
    Llm(#[from] reggap_llm_client::LlmError),
}
