//! # Reggap LLM Client
//!
//! Chat-completion collaborator for the gap analysis pipeline.
//!
//! The pipeline treats the hosted language model as an external
//! capability with a single operation: a two-message exchange
//! (system persona + user prompt) returning free text. This crate
//! defines that contract ([`ChatClient`]) and an OpenAI-compatible
//! HTTP implementation with a bounded per-call timeout.

mod client;
mod error;
mod openai;

pub use client::{ChatClient, ChatOptions};
pub use error::{LlmError, Result};
pub use openai::OpenAiChatClient;
