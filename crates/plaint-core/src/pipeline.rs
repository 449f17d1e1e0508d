//! Retrieve → assemble → generate.

use std::sync::Arc;

use plaint_index::retriever::{RetrievedChunk, Retriever};
use plaint_index::vector_store::VectorStore;
use plaint_llm::LlmProvider;
use plaint_llm::provider::Message;

use crate::error::PipelineError;
use crate::prompt::build_prompt;

/// A generated answer plus the chunks it was grounded on, in retrieval
/// order, so callers can show sources next to the answer.
#[derive(Debug)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<RetrievedChunk>,
}

/// The query-time pipeline. The provider doubles as embedder (through the
/// retriever) and generator; both are injected, never ambient.
pub struct RagPipeline<P> {
    retriever: Retriever<P>,
    provider: Arc<P>,
}

impl<P: LlmProvider> RagPipeline<P> {
    #[must_use]
    pub fn new(
        store: Arc<dyn VectorStore>,
        provider: Arc<P>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            retriever: Retriever::new(store, provider.clone(), collection),
            provider,
        }
    }

    /// Answer a question grounded on the `top_k` nearest indexed chunks.
    ///
    /// # Errors
    ///
    /// Propagates retrieval errors (blank question, embedding or search
    /// failure) and generation errors. Callers must surface these as
    /// "answer unavailable", never substitute other text.
    pub async fn answer(&self, question: &str, top_k: usize) -> Result<Answer, PipelineError> {
        let sources = self.retriever.retrieve(question, top_k).await?;
        let prompt = build_prompt(question, &sources);

        tracing::debug!(sources = sources.len(), "prompt assembled");

        let text = self.provider.chat(&[Message::user(prompt)]).await?;
        Ok(Answer { text, sources })
    }
}
