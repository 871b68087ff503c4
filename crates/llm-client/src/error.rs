use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication rejected by the chat endpoint")]
    Auth,

    #[error("Rate limited by the chat endpoint")]
    RateLimited,

    #[error("Chat endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid chat response: {0}")]
    InvalidResponse(String),
}
