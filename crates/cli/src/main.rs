use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reggap_analysis::{parse_page_ranges, retrieve, AnalysisRequest, Pipeline, PipelineConfig};
use reggap_document_index::{
    DocumentIndex, Embedder, HttpEmbedder, IndexCache, StubEmbedder, TextChunker,
};
use reggap_llm_client::{ChatClient, ChatOptions, OpenAiChatClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod config;

use config::AppConfig;

/// Printed when a Q&A retrieval normalizes to an empty answer.
const NO_ANSWER_MESSAGE: &str = "The document does not answer this question.";

#[derive(Parser)]
#[command(name = "reggap")]
#[command(about = "Regulatory gap analysis against internal policy documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a regulatory document against a policy document and
    /// draft a policy update
    Analyze(AnalyzeArgs),

    /// Ask a question against a single document
    Qa(QaArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Path to the regulatory document (raw text)
    #[arg(long)]
    regulatory: PathBuf,

    /// Path to the internal policy document (raw text)
    #[arg(long)]
    policy: PathBuf,

    /// Pages of the regulatory document to probe, e.g. "3,5-7"
    #[arg(long, default_value = "")]
    regulatory_pages: String,

    /// Pages of the policy document to probe, e.g. "2"
    #[arg(long, default_value = "")]
    policy_pages: String,

    #[command(flatten)]
    overrides: SharedOverrides,
}

#[derive(Args)]
struct QaArgs {
    /// Path to the document (raw text)
    #[arg(long)]
    document: PathBuf,

    /// Question to answer from the document
    #[arg(long)]
    question: String,

    /// Passages to retrieve per query
    #[arg(long)]
    top_k: Option<usize>,

    #[command(flatten)]
    overrides: SharedOverrides,
}

#[derive(Args)]
struct SharedOverrides {
    /// Override the chat model from the config file
    #[arg(long)]
    model: Option<String>,

    /// Override the chat endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Embedding backend
    #[arg(long, value_enum, default_value_t = EmbedMode::Http)]
    embed_mode: EmbedMode,
}

#[derive(Copy, Clone, ValueEnum)]
enum EmbedMode {
    /// Hosted embedding endpoint
    Http,
    /// Deterministic offline vectors (dry runs, tests)
    Stub,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => {
            args.overrides.apply(&mut config);
            analyze(&args, &config).await
        }
        Commands::Qa(args) => {
            args.overrides.apply(&mut config);
            qa(&args, &config).await
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

impl SharedOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.llm.base_url = base_url.clone();
        }
    }
}

async fn analyze(args: &AnalyzeArgs, config: &AppConfig) -> Result<()> {
    validate_analyze_inputs(args)?;

    let api_key = load_api_key()?;
    let chat = build_chat(config, &api_key)?;
    let embedder = build_embedder(args.overrides.embed_mode, config, &api_key)?;

    let pipeline_config = PipelineConfig {
        regulatory_top_k: config.pipeline.regulatory_top_k,
        policy_top_k: config.pipeline.policy_top_k,
        max_topics_per_side: config.pipeline.max_topics_per_side,
        chunker: build_chunker(config)?,
    };

    let pipeline = Pipeline::new(chat, embedder, Arc::new(IndexCache::new()), pipeline_config);

    let request = AnalysisRequest {
        regulatory_path: args.regulatory.clone(),
        policy_path: args.policy.clone(),
        regulatory_pages: args.regulatory_pages.clone(),
        policy_pages: args.policy_pages.clone(),
    };

    log::info!(
        "Analyzing {} against {}",
        args.regulatory.display(),
        args.policy.display()
    );
    let response = pipeline.run(&request).await?;
    println!("{response}");
    Ok(())
}

async fn qa(args: &QaArgs, config: &AppConfig) -> Result<()> {
    validate_qa_inputs(args)?;

    let api_key = load_api_key()?;
    let chat = build_chat(config, &api_key)?;
    let embedder = build_embedder(args.overrides.embed_mode, config, &api_key)?;
    let chunker = build_chunker(config)?;

    log::info!(
        "Answering question against {}",
        args.document.display()
    );
    let index = DocumentIndex::build(&args.document, &chunker, embedder.as_ref()).await?;

    let top_k = args.top_k.unwrap_or(config.pipeline.regulatory_top_k);
    let answer = retrieve(
        &index,
        embedder.as_ref(),
        chat.as_ref(),
        &args.question,
        top_k,
    )
    .await?;

    if answer.is_empty() {
        println!("{NO_ANSWER_MESSAGE}");
    } else {
        println!("{answer}");
    }
    Ok(())
}

fn load_api_key() -> Result<String> {
    std::env::var("REGGAP_API_KEY")
        .context("REGGAP_API_KEY is not set (required for hosted LLM calls)")
}

fn build_chat(config: &AppConfig, api_key: &str) -> Result<Arc<dyn ChatClient>> {
    Ok(Arc::new(OpenAiChatClient::with_timeout(
        &config.llm.base_url,
        api_key,
        ChatOptions {
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: None,
        },
        Duration::from_secs(config.llm.timeout_secs),
    )?))
}

fn build_embedder(
    mode: EmbedMode,
    config: &AppConfig,
    api_key: &str,
) -> Result<Arc<dyn Embedder>> {
    Ok(match mode {
        EmbedMode::Http => Arc::new(HttpEmbedder::with_timeout(
            &config.embedding.base_url,
            api_key,
            &config.embedding.model,
            config.embedding.dimension,
            Duration::from_secs(config.embedding.timeout_secs),
        )?),
        EmbedMode::Stub => Arc::new(StubEmbedder::new(config.embedding.dimension)),
    })
}

fn build_chunker(config: &AppConfig) -> Result<TextChunker> {
    Ok(TextChunker::new(
        config.pipeline.chunk_size,
        config.pipeline.chunk_overlap,
    )?)
}

/// Reject obviously bad input before any network call: missing
/// documents, or a page-range string that parses to nothing despite
/// not being empty.
fn validate_analyze_inputs(args: &AnalyzeArgs) -> Result<()> {
    if !args.regulatory.exists() {
        bail!(
            "Regulatory document not found: {}",
            args.regulatory.display()
        );
    }
    if !args.policy.exists() {
        bail!("Policy document not found: {}", args.policy.display());
    }

    for (label, input) in [
        ("regulatory", &args.regulatory_pages),
        ("policy", &args.policy_pages),
    ] {
        if !input.trim().is_empty() && parse_page_ranges(input).is_empty() {
            bail!("No usable pages in {label} page range '{input}'");
        }
    }

    Ok(())
}

fn validate_qa_inputs(args: &QaArgs) -> Result<()> {
    if !args.document.exists() {
        bail!("Document not found: {}", args.document.display());
    }
    if args.question.trim().is_empty() {
        bail!("Question must not be blank");
    }
    Ok(())
}
