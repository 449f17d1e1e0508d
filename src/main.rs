use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use plaint_core::config::Config;
use plaint_core::pipeline::RagPipeline;
use plaint_index::corpus::{NarrativeSplitter, SplitterConfig, StratifiedSampler, load_csv};
use plaint_index::indexer::IndexBuilder;
use plaint_index::qdrant::QdrantVectorStore;
use plaint_index::vector_store::VectorStore;
use plaint_llm::ollama::OllamaProvider;

#[derive(Debug, Parser)]
#[command(name = "plaint", about = "Complaint-narrative retrieval-augmented QA")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "plaint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the vector index from a complaint export.
    Index {
        /// CSV export with complaint id, product, issue, and narrative columns.
        csv: PathBuf,

        /// Drop the existing collection before building.
        #[arg(long)]
        rebuild: bool,
    },
    /// Ask a question against the built index.
    Ask {
        question: String,

        /// Number of chunks to ground the answer on.
        #[arg(long)]
        top_k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    tracing::info!(
        model = %config.llm.model,
        collection = %config.index.collection,
        "configuration loaded"
    );

    let provider = Arc::new(OllamaProvider::new(
        &config.llm.base_url,
        config.llm.model.clone(),
        config.llm.embedding_model.clone(),
    ));
    let store: Arc<dyn VectorStore> = Arc::new(
        QdrantVectorStore::new(&config.index.qdrant_url)
            .context("failed to connect to Qdrant")?,
    );

    match cli.command {
        Command::Index { csv, rebuild } => {
            if rebuild {
                store
                    .delete_collection(&config.index.collection)
                    .await
                    .context("failed to drop existing collection")?;
                tracing::info!(collection = %config.index.collection, "collection dropped");
            }

            let documents = load_csv(&csv)
                .with_context(|| format!("failed to load complaints from {}", csv.display()))?;

            let sampler =
                StratifiedSampler::new(config.index.sample_size, config.index.sample_seed);
            let sampled = sampler.sample(&documents)?;

            let splitter = NarrativeSplitter::new(SplitterConfig {
                chunk_size: config.index.chunk_size,
                chunk_overlap: config.index.chunk_overlap,
            })?;
            let chunks = splitter.split_documents(&sampled)?;

            let builder = IndexBuilder::new(store, provider, &config.index.collection);
            let report = builder.build(&chunks, config.index.batch_size).await?;

            println!(
                "indexed {} chunks from {} sampled complaints in {} batches ({} ms)",
                report.chunks_indexed,
                sampled.len(),
                report.batches,
                report.duration_ms
            );
        }
        Command::Ask { question, top_k } => {
            let top_k = top_k.unwrap_or(config.index.top_k);
            let pipeline = RagPipeline::new(store, provider, &config.index.collection);

            let answer = pipeline.answer(&question, top_k).await?;

            println!("{}\n", answer.text.trim());
            if !answer.sources.is_empty() {
                println!("Top sources:");
                for source in answer.sources.iter().take(3) {
                    println!(
                        "- [{} / {} / #{}] {}",
                        source.product, source.issue, source.complaint_id, source.text
                    );
                }
            }
        }
    }

    Ok(())
}
