//! Question → nearest complaint chunks.

use std::sync::Arc;

use plaint_llm::LlmProvider;

use crate::error::{IndexError, Result};
use crate::vector_store::{ScoredVectorPoint, VectorStore};

/// A retrieved chunk with its source metadata, as stored at build time.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub text: String,
    pub complaint_id: String,
    pub product: String,
    pub issue: String,
    pub chunk_index: usize,
    pub score: f32,
}

/// Embeds a question and returns the k nearest chunks, in index order.
pub struct Retriever<P> {
    store: Arc<dyn VectorStore>,
    provider: Arc<P>,
    collection: String,
}

impl<P: LlmProvider> Retriever<P> {
    #[must_use]
    pub fn new(store: Arc<dyn VectorStore>, provider: Arc<P>, collection: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            collection: collection.into(),
        }
    }

    /// Retrieve up to `k` chunks for `question`, nearest first. Fewer than
    /// `k` come back when the index holds fewer entries; an empty index
    /// yields an empty result.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyQuestion`] for a blank question — checked before
    /// any embedding call, so no model invocation is wasted. Otherwise
    /// embedding or search errors propagate.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        if question.trim().is_empty() {
            return Err(IndexError::EmptyQuestion);
        }

        let query_vector = self.provider.embed(question).await?;
        let hits = self
            .store
            .search(&self.collection, query_vector, k as u64)
            .await?;

        tracing::debug!(requested = k, returned = hits.len(), "retrieval done");

        Ok(hits.into_iter().filter_map(decode_hit).collect())
    }
}

fn decode_hit(hit: ScoredVectorPoint) -> Option<RetrievedChunk> {
    let payload = &hit.payload;
    let text = payload.get("text")?.as_str()?.to_owned();
    let complaint_id = payload.get("complaint_id")?.as_str()?.to_owned();
    let product = payload.get("product")?.as_str()?.to_owned();
    let issue = payload.get("issue")?.as_str()?.to_owned();
    let chunk_index = usize::try_from(payload.get("chunk_index")?.as_u64()?).ok()?;

    Some(RetrievedChunk {
        text,
        complaint_id,
        product,
        issue,
        chunk_index,
        score: hit.score,
    })
}
