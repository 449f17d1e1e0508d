//! Batched index construction: chunks → embeddings → vector collection.

use std::collections::HashMap;
use std::sync::Arc;

use plaint_llm::{LlmError, LlmProvider};
use uuid::Uuid;

use crate::corpus::Chunk;
use crate::error::{IndexError, Result};
use crate::vector_store::{VectorPoint, VectorStore};

/// How often (in batches) to log build progress.
const PROGRESS_EVERY: usize = 5;

/// Summary of an index build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub chunks_indexed: usize,
    pub batches: usize,
    pub duration_ms: u64,
}

/// Builds the vector index from chunked narratives.
///
/// Batching bounds peak memory and gives failures a locality: an error
/// identifies the offset of the batch it happened in. There is no rollback —
/// batches persisted before a failure stay in the collection, and re-running
/// `build` against the same collection appends fresh entries rather than
/// deduplicating.
pub struct IndexBuilder<P> {
    store: Arc<dyn VectorStore>,
    provider: Arc<P>,
    collection: String,
}

impl<P: LlmProvider> IndexBuilder<P> {
    #[must_use]
    pub fn new(store: Arc<dyn VectorStore>, provider: Arc<P>, collection: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            collection: collection.into(),
        }
    }

    /// Embed and persist all chunks in sequential batches of ≤ `batch_size`.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyCorpus`] for zero chunks and
    /// [`IndexError::Probe`] if the sizing embedding fails; otherwise the
    /// first embedding or persistence failure aborts the build, wrapped
    /// with the failing batch's starting offset.
    pub async fn build(&self, chunks: &[Chunk], batch_size: usize) -> Result<BuildReport> {
        if chunks.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let batch_size = batch_size.max(1);
        let start = std::time::Instant::now();

        // Probe the embedder once to size the collection's vectors.
        let probe = self
            .provider
            .embed("probe")
            .await
            .map_err(|source| IndexError::Probe { source })?;
        self.store
            .ensure_collection(&self.collection, probe.len() as u64)
            .await?;

        tracing::info!(total = chunks.len(), batch_size, "index build started");

        let mut report = BuildReport::default();

        for (batch_no, batch) in chunks.chunks(batch_size).enumerate() {
            let offset = batch_no * batch_size;

            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self
                .provider
                .embed_batch(&texts)
                .await
                .map_err(|source| IndexError::Embedding { offset, source })?;
            if vectors.len() != batch.len() {
                return Err(IndexError::Embedding {
                    offset,
                    source: LlmError::BatchMismatch {
                        expected: batch.len(),
                        got: vectors.len(),
                    },
                });
            }

            let points: Vec<VectorPoint> = batch
                .iter()
                .zip(vectors)
                .map(|(chunk, vector)| VectorPoint {
                    id: Uuid::new_v4().to_string(),
                    vector,
                    payload: chunk_payload(chunk),
                })
                .collect();

            self.store
                .upsert(&self.collection, points)
                .await
                .map_err(|source| IndexError::Persistence { offset, source })?;

            report.chunks_indexed += batch.len();
            report.batches += 1;

            if batch_no % PROGRESS_EVERY == 0 {
                tracing::info!(
                    processed = report.chunks_indexed,
                    total = chunks.len(),
                    "indexing progress"
                );
            }
        }

        report.duration_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        tracing::info!(
            chunks = report.chunks_indexed,
            batches = report.batches,
            duration_ms = report.duration_ms,
            "index build finished"
        );
        Ok(report)
    }
}

fn chunk_payload(chunk: &Chunk) -> HashMap<String, serde_json::Value> {
    HashMap::from([
        ("complaint_id".to_owned(), chunk.complaint_id.clone().into()),
        ("product".to_owned(), chunk.product.clone().into()),
        ("issue".to_owned(), chunk.issue.clone().into()),
        ("chunk_index".to_owned(), chunk.chunk_index.into()),
        ("text".to_owned(), chunk.text.clone().into()),
    ])
}
