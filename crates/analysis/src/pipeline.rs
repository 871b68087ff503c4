use crate::compare::GapComparer;
use crate::error::{AnalysisError, Result};
use crate::page_range::parse_page_ranges;
use crate::probe::ProbeGenerator;
use crate::retrieval::retrieve;
use crate::synthesize::DraftSynthesizer;
use reggap_document_index::{DocumentIndex, Embedder, IndexCache, TextChunker};
use reggap_llm_client::ChatClient;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Fixed result when every topic came back without a gap finding.
pub const NO_GAPS_MESSAGE: &str =
    "No gaps were identified between the regulatory and policy documents.";

/// Knobs for one pipeline instance.
///
/// The regulatory corpus is treated as the authoritative, larger corpus,
/// hence the asymmetric top-k defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Passages retrieved per query from the regulatory index
    pub regulatory_top_k: usize,

    /// Passages retrieved per query from the policy index
    pub policy_top_k: usize,

    /// Cap on candidate topics split out of each side's probe reply
    pub max_topics_per_side: usize,

    /// Chunking applied when building both indexes
    pub chunker: TextChunker,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            regulatory_top_k: 4,
            policy_top_k: 2,
            max_topics_per_side: 5,
            chunker: TextChunker::default(),
        }
    }
}

/// One user-initiated gap analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub regulatory_path: PathBuf,
    pub policy_path: PathBuf,
    pub regulatory_pages: String,
    pub policy_pages: String,
}

/// Orchestrates a full analysis run against injected collaborators.
///
/// Collaborators arrive at construction, never as ambient globals, so
/// concurrent pipelines can hold independent or shared instances.
/// Execution within a run is strictly sequential; an index-build or
/// chat failure aborts the run and propagates to the caller.
pub struct Pipeline {
    chat: Arc<dyn ChatClient>,
    embedder: Arc<dyn Embedder>,
    cache: Arc<IndexCache>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        chat: Arc<dyn ChatClient>,
        embedder: Arc<dyn Embedder>,
        cache: Arc<IndexCache>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            chat,
            embedder,
            cache,
            config,
        }
    }

    pub async fn run(&self, request: &AnalysisRequest) -> Result<String> {
        let regulatory_pages = parse_page_ranges(&request.regulatory_pages);
        let policy_pages = parse_page_ranges(&request.policy_pages);
        log::info!(
            "Starting gap analysis: {} (pages {:?}) vs {} (pages {:?})",
            request.regulatory_path.display(),
            regulatory_pages,
            request.policy_path.display(),
            policy_pages
        );

        let regulatory_index = self
            .cache
            .get_or_build(
                &request.regulatory_path,
                &self.config.chunker,
                self.embedder.as_ref(),
            )
            .await?;
        let policy_index = self
            .cache
            .get_or_build(
                &request.policy_path,
                &self.config.chunker,
                self.embedder.as_ref(),
            )
            .await?;

        let topics = self
            .generate_topics(&regulatory_pages, &policy_pages, request)
            .await?;
        log::info!("Probing {} topics", topics.len());

        let mut findings = Vec::new();
        for topic in &topics {
            let regulatory_answer = self
                .answer_or_empty(&regulatory_index, topic, self.config.regulatory_top_k)
                .await?;
            let policy_answer = self
                .answer_or_empty(&policy_index, topic, self.config.policy_top_k)
                .await?;

            if regulatory_answer.is_empty() && policy_answer.is_empty() {
                log::debug!("Skipping topic with no answers on either side: '{topic}'");
                continue;
            }

            let finding = GapComparer::new(self.chat.as_ref())
                .compare(&regulatory_answer, &policy_answer)
                .await?;
            findings.push(format!("Topic: {topic}\n{finding}"));
        }

        if findings.is_empty() {
            log::info!("No findings retained; reporting no gaps");
            return Ok(NO_GAPS_MESSAGE.to_string());
        }

        DraftSynthesizer::new(self.chat.as_ref())
            .synthesize(&findings)
            .await
    }

    /// One probe exchange per document side, each contributing at most
    /// `max_topics_per_side` candidate topics from its raw reply.
    async fn generate_topics(
        &self,
        regulatory_pages: &[usize],
        policy_pages: &[usize],
        request: &AnalysisRequest,
    ) -> Result<Vec<String>> {
        let probe = ProbeGenerator::new(self.chat.as_ref());
        let per_side = self.config.max_topics_per_side;

        let mut topics = probe
            .candidates(regulatory_pages, &request.regulatory_path, per_side)
            .await?;
        topics.extend(
            probe
                .candidates(policy_pages, &request.policy_path, per_side)
                .await?,
        );
        Ok(topics)
    }

    /// A too-short probe is not worth aborting the run over; treat it
    /// as "no answer" and let the both-empty skip handle it.
    async fn answer_or_empty(
        &self,
        index: &DocumentIndex,
        topic: &str,
        top_k: usize,
    ) -> Result<String> {
        match retrieve(
            index,
            self.embedder.as_ref(),
            self.chat.as_ref(),
            topic,
            top_k,
        )
        .await
        {
            Ok(answer) => Ok(answer),
            Err(AnalysisError::InvalidQuery) => {
                log::debug!("Topic too short to retrieve against: '{topic}'");
                Ok(String::new())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_uses_asymmetric_top_k() {
        let config = PipelineConfig::default();
        assert_eq!(config.regulatory_top_k, 4);
        assert_eq!(config.policy_top_k, 2);
        assert_eq!(config.max_topics_per_side, 5);
    }
}
