//! End-to-end pipeline runs against scripted collaborators.

use reggap_analysis::testing::ScriptedChat;
use reggap_analysis::{AnalysisRequest, Pipeline, PipelineConfig, NO_GAPS_MESSAGE};
use reggap_document_index::{IndexCache, StubEmbedder};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const FALLBACK: &str = "no such requirement is found";

fn write_docs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let regulatory = dir.path().join("regulation.txt");
    let policy = dir.path().join("policy.txt");
    std::fs::write(
        &regulatory,
        "Institutions must report security breaches to the supervisor within 72 hours.",
    )
    .unwrap();
    std::fs::write(
        &policy,
        "Our staff handbook covers office access badges and visitor sign-in.",
    )
    .unwrap();
    (regulatory, policy)
}

fn request(regulatory: PathBuf, policy: PathBuf) -> AnalysisRequest {
    AnalysisRequest {
        regulatory_path: regulatory,
        policy_path: policy,
        regulatory_pages: "0".to_string(),
        policy_pages: "0".to_string(),
    }
}

fn pipeline(chat: Arc<ScriptedChat>, embedder: Arc<StubEmbedder>) -> Pipeline {
    Pipeline::new(
        chat,
        embedder,
        Arc::new(IndexCache::new()),
        PipelineConfig::default(),
    )
}

#[tokio::test]
async fn all_empty_retrievals_report_no_gaps() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    // Two probes, then both retrievals per topic come back empty.
    let chat = Arc::new(ScriptedChat::with_replies(vec![
        "What breach reporting deadline is mandated?".to_string(),
        "What does the policy require for breaches?".to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
    ]));
    let pipeline = pipeline(chat.clone(), Arc::new(StubEmbedder::new(16)));

    let result = pipeline.run(&request(regulatory, policy)).await.unwrap();
    assert_eq!(result, NO_GAPS_MESSAGE);

    // No compare, draft, or synthesis calls were made.
    assert_eq!(chat.exchanges().len(), 6);
}

#[tokio::test]
async fn retained_finding_flows_into_draft_and_synthesis() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    let chat = Arc::new(ScriptedChat::with_replies(vec![
        "What breach reporting deadline is mandated?".to_string(),
        "What does the policy require for breaches?".to_string(),
        // Topic 1: substantive regulatory answer, empty policy answer.
        "Breaches must be reported within 72 hours.".to_string(),
        FALLBACK.to_string(),
        // Topic 2: empty on both sides, skipped.
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        "Missing: 72-hour breach reporting requirement".to_string(),
        "drafted policy language".to_string(),
        "FINAL RESPONSE".to_string(),
    ]));
    let pipeline = pipeline(chat.clone(), Arc::new(StubEmbedder::new(16)));

    let result = pipeline.run(&request(regulatory, policy)).await.unwrap();
    assert_eq!(result, "FINAL RESPONSE");

    let exchanges = chat.exchanges();
    assert_eq!(exchanges.len(), 9);

    // Compare saw the substantive answer and the policy-side placeholder.
    let compare_prompt = &exchanges[6].1;
    assert!(compare_prompt.contains("Breaches must be reported within 72 hours."));
    assert!(compare_prompt.contains("[No PRA answer]"));

    // The finding flowed into the joined draft input with its topic.
    let draft_prompt = &exchanges[7].1;
    assert!(draft_prompt.contains("Missing: 72-hour breach reporting requirement"));
    assert!(draft_prompt.contains("Topic: What breach reporting deadline is mandated?"));
}

#[tokio::test]
async fn delimited_probe_reply_contributes_multiple_topics() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    // The regulatory probe reply carries two delimited questions, so
    // three topics run in total and each side is retrieved per topic.
    let chat = Arc::new(ScriptedChat::with_replies(vec![
        "What breach deadline applies? *** What encryption is required?".to_string(),
        "What does the policy require for breaches?".to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
        FALLBACK.to_string(),
    ]));
    let pipeline = pipeline(chat.clone(), Arc::new(StubEmbedder::new(16)));

    let result = pipeline.run(&request(regulatory, policy)).await.unwrap();
    assert_eq!(result, NO_GAPS_MESSAGE);
    assert_eq!(chat.exchanges().len(), 8);
}

#[tokio::test]
async fn too_short_topic_is_skipped_without_retrieval_calls() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    let chat = Arc::new(ScriptedChat::with_replies(vec![
        "What breach reporting deadline is mandated?".to_string(),
        // Under 10 characters: InvalidQuery on both sides, topic skipped.
        "short".to_string(),
        "Breaches must be reported within 72 hours.".to_string(),
        FALLBACK.to_string(),
        "Missing: breach reporting".to_string(),
        "draft".to_string(),
        "synthesis".to_string(),
    ]));
    let pipeline = pipeline(chat.clone(), Arc::new(StubEmbedder::new(16)));

    let result = pipeline.run(&request(regulatory, policy)).await.unwrap();
    assert_eq!(result, "synthesis");
    assert_eq!(chat.exchanges().len(), 7);
}

#[tokio::test]
async fn chat_failure_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    let chat = Arc::new(ScriptedChat::failing());
    let pipeline = pipeline(chat, Arc::new(StubEmbedder::new(16)));

    let result = pipeline.run(&request(regulatory, policy)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn second_run_reuses_cached_indexes() {
    let dir = TempDir::new().unwrap();
    let (regulatory, policy) = write_docs(&dir);

    let replies: Vec<String> = (0..2)
        .flat_map(|_| {
            vec![
                "What breach reporting deadline is mandated?".to_string(),
                "What does the policy require for breaches?".to_string(),
                FALLBACK.to_string(),
                FALLBACK.to_string(),
                FALLBACK.to_string(),
                FALLBACK.to_string(),
            ]
        })
        .collect();
    let chat = Arc::new(ScriptedChat::with_replies(replies));
    let embedder = Arc::new(StubEmbedder::new(16));
    let pipeline = pipeline(chat, embedder.clone());

    let req = request(regulatory, policy);
    pipeline.run(&req).await.unwrap();
    let builds_and_queries_first_run = embedder.batch_calls();

    pipeline.run(&req).await.unwrap();

    // Second run embeds only the four retrieval queries; the two
    // document builds are served from the cache.
    assert_eq!(builds_and_queries_first_run, 6);
    assert_eq!(embedder.batch_calls(), 10);
}

#[tokio::test]
async fn missing_document_aborts_before_any_chat_call() {
    let dir = TempDir::new().unwrap();
    let (regulatory, _) = write_docs(&dir);

    let chat = Arc::new(ScriptedChat::with_replies(vec![]));
    let pipeline = pipeline(chat.clone(), Arc::new(StubEmbedder::new(16)));

    let req = request(regulatory, dir.path().join("absent.txt"));
    let result = pipeline.run(&req).await;

    assert!(result.is_err());
    assert!(chat.exchanges().is_empty());
}
