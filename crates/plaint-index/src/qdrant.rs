//! Qdrant-backed vector store.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};

use crate::vector_store::{
    ScoredVectorPoint, VectorPoint, VectorStore, VectorStoreError,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Path-addressed persistent index: reopening the same URL and collection
/// reattaches to previously built entries.
pub struct QdrantVectorStore {
    client: Qdrant,
}

impl std::fmt::Debug for QdrantVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantVectorStore").finish_non_exhaustive()
    }
}

impl QdrantVectorStore {
    /// Create a store connected to the given Qdrant URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the Qdrant client cannot be created.
    pub fn new(url: &str) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

fn payload_to_qdrant(
    payload: HashMap<String, serde_json::Value>,
) -> Result<HashMap<String, qdrant_client::qdrant::Value>, VectorStoreError> {
    serde_json::from_value(serde_json::Value::Object(payload.into_iter().collect()))
        .map_err(|e| VectorStoreError::Serialization(e.to_string()))
}

fn payload_to_json(
    payload: HashMap<String, qdrant_client::qdrant::Value>,
) -> HashMap<String, serde_json::Value> {
    payload
        .into_iter()
        .map(|(k, v)| (k, qdrant_value_to_json(v)))
        .collect()
}

fn qdrant_value_to_json(value: qdrant_client::qdrant::Value) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind;

    match value.kind {
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(i),
        Some(Kind::DoubleValue(d)) => serde_json::Value::from(d),
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::StructValue(s)) => serde_json::Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
        Some(Kind::ListValue(l)) => serde_json::Value::Array(
            l.values.into_iter().map(qdrant_value_to_json).collect(),
        ),
        Some(Kind::NullValue(_)) | None => serde_json::Value::Null,
    }
}

fn point_id_string(id: Option<qdrant_client::qdrant::PointId>) -> String {
    match id.and_then(|p| p.point_id_options) {
        Some(PointIdOptions::Uuid(s)) => s,
        Some(PointIdOptions::Num(n)) => n.to_string(),
        None => String::new(),
    }
}

impl VectorStore for QdrantVectorStore {
    fn ensure_collection(
        &self,
        collection: &str,
        vector_size: u64,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            if exists {
                return Ok(());
            }
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&collection)
                        .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine)),
                )
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            Ok(())
        })
    }

    fn collection_exists(&self, collection: &str) -> BoxFuture<'_, Result<bool, VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            self.client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))
        })
    }

    fn delete_collection(&self, collection: &str) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            if !exists {
                return Ok(());
            }
            self.client
                .delete_collection(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            Ok(())
        })
    }

    fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let points = points
                .into_iter()
                .map(|p| {
                    payload_to_qdrant(p.payload)
                        .map(|payload| PointStruct::new(p.id, p.vector, payload))
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.client
                .upsert_points(UpsertPointsBuilder::new(&collection, points))
                .await
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            Ok(())
        })
    }

    fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredVectorPoint>, VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            // An index that was never built is treated as empty, not broken.
            let exists = self
                .client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;
            if !exists {
                return Ok(Vec::new());
            }

            let results = self
                .client
                .search_points(
                    SearchPointsBuilder::new(&collection, vector, limit).with_payload(true),
                )
                .await
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;

            Ok(results
                .result
                .into_iter()
                .map(|point| ScoredVectorPoint {
                    id: point_id_string(point.id),
                    score: point.score,
                    payload: payload_to_json(point.payload),
                })
                .collect())
        })
    }

    fn count(&self, collection: &str) -> BoxFuture<'_, Result<u64, VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Count(e.to_string()))?;
            if !exists {
                return Ok(0);
            }
            let response = self
                .client
                .count(CountPointsBuilder::new(&collection).exact(true))
                .await
                .map_err(|e| VectorStoreError::Count(e.to_string()))?;
            Ok(response.result.map_or(0, |r| r.count))
        })
    }
}
