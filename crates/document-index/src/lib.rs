//! # Reggap Document Index
//!
//! Semantic retrieval over uploaded regulatory and policy documents.
//!
//! ## Architecture
//!
//! ```text
//! Document path
//!     │
//!     ├──> Page loader (raw text, form-feed page breaks)
//!     │
//!     ├──> TextChunker (1500 chars, 200 overlap)
//!     │
//!     ├──> Embedder (HTTP collaborator or deterministic stub)
//!     │      └─> Vector per chunk
//!     │
//!     └──> DocumentIndex
//!            └─> cosine-similarity query, top-k passages
//! ```
//!
//! Index construction is the only operation expensive enough to warrant
//! reuse, so [`IndexCache`] keys built indexes by canonical source path
//! and hands out shared [`std::sync::Arc`] handles.

mod cache;
mod chunker;
mod embedder;
mod error;
mod index;
mod pages;

pub use cache::IndexCache;
pub use chunker::TextChunker;
pub use embedder::{Embedder, HttpEmbedder, StubEmbedder};
pub use error::{DocumentIndexError, Result};
pub use index::{DocumentIndex, Passage};
pub use pages::load_pages;
