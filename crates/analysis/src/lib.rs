//! # Reggap Analysis
//!
//! Gap analysis between a regulatory document and an internal policy
//! document.
//!
//! ## Architecture
//!
//! ```text
//! page-range strings
//!     │
//!     ├──> parse_page_ranges ──> page selections
//!     │
//!     ├──> ProbeGenerator ─────> probing topics (LLM)
//!     │
//!     ├──> retrieve ───────────> per-topic answers (index + LLM)
//!     │        regulatory top_k=4 / policy top_k=2
//!     │
//!     ├──> GapComparer ────────> per-topic gap findings (LLM)
//!     │
//!     └──> DraftSynthesizer ───> drafted policy language + synthesis
//! ```
//!
//! The chat client, embedder and index cache are injected into
//! [`Pipeline`] at construction; nothing here is ambient state, so
//! independent pipelines can share or isolate collaborators as they
//! choose.

mod compare;
mod error;
mod page_range;
mod pipeline;
mod probe;
mod prompts;
mod retrieval;
mod synthesize;
pub mod testing;
mod topics;

pub use compare::GapComparer;
pub use error::{AnalysisError, Result};
pub use page_range::parse_page_ranges;
pub use pipeline::{AnalysisRequest, Pipeline, PipelineConfig, NO_GAPS_MESSAGE};
pub use probe::ProbeGenerator;
pub use retrieval::{is_fallback, retrieve};
pub use synthesize::DraftSynthesizer;
pub use topics::{select_topic, split_candidates};
