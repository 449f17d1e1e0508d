//! Error types for indexing and retrieval.

use plaint_llm::LlmError;

use crate::vector_store::VectorStoreError;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// `build` was handed zero chunks.
    #[error("no chunks to index")]
    EmptyCorpus,

    /// The question was empty or whitespace-only.
    #[error("question is empty")]
    EmptyQuestion,

    /// The dimension-sizing probe embedding failed, before any batch ran.
    #[error("dimension probe embedding failed: {source}")]
    Probe { source: LlmError },

    /// Embedding a batch failed; `offset` is the index of the batch's first
    /// chunk within the build input.
    #[error("embedding failed for batch starting at chunk {offset}: {source}")]
    Embedding { offset: usize, source: LlmError },

    /// Persisting a batch failed; `offset` as above. Earlier batches stay
    /// persisted — there is no rollback across batches.
    #[error("vector store write failed for batch starting at chunk {offset}: {source}")]
    Persistence {
        offset: usize,
        source: VectorStoreError,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("vector store error: {0}")]
    VectorStore(#[from] VectorStoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
