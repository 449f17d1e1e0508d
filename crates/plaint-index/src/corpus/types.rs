use serde::{Deserialize, Serialize};

/// A complaint with its cleaned narrative. Source of truth for the
/// build-time pipeline; immutable once cleaned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub complaint_id: String,
    pub product: String,
    pub issue: String,
    pub narrative: String,
}

/// A bounded, overlapping substring of one document's narrative — the unit
/// of embedding and retrieval. `chunk_index` is 0-based and contiguous
/// within the owning document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub complaint_id: String,
    pub product: String,
    pub issue: String,
    pub chunk_index: usize,
    pub text: String,
}
