//! Backend-neutral vector index capability.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("collection error: {0}")]
    Collection(String),
    #[error("upsert error: {0}")]
    Upsert(String),
    #[error("search error: {0}")]
    Search(String),
    #[error("count error: {0}")]
    Count(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One indexed entry: id, embedding, and a JSON payload carrying the chunk
/// text plus its complaint metadata.
#[derive(Debug, Clone)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: HashMap<String, serde_json::Value>,
}

/// A nearest-neighbor hit, higher score = closer.
#[derive(Debug, Clone)]
pub struct ScoredVectorPoint {
    pub id: String,
    pub score: f32,
    pub payload: HashMap<String, serde_json::Value>,
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistent vector index consumed as a capability. The index's internal
/// similarity algorithm is the backend's concern; callers only rely on
/// nearest-first ordering.
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist. Idempotent.
    fn ensure_collection(
        &self,
        collection: &str,
        vector_size: u64,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    fn collection_exists(&self, collection: &str) -> BoxFuture<'_, Result<bool, VectorStoreError>>;

    /// Drop the collection and everything in it. Used for full rebuilds;
    /// a no-op if the collection does not exist.
    fn delete_collection(&self, collection: &str) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    /// Up to `limit` nearest entries, nearest first. Searching an empty or
    /// absent collection yields an empty result, not an error.
    fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredVectorPoint>, VectorStoreError>>;

    /// Number of entries currently stored.
    fn count(&self, collection: &str) -> BoxFuture<'_, Result<u64, VectorStoreError>>;
}
