//! Complaint-narrative indexing and semantic retrieval.
//!
//! The build-time pipeline loads a complaint export, down-samples it to a
//! balanced working corpus, splits narratives into overlapping chunks, and
//! embeds them into a vector collection. At query time the retriever embeds
//! a question and returns the nearest chunks with their source metadata.

pub mod corpus;
pub mod error;
pub mod in_memory;
pub mod indexer;
pub mod qdrant;
pub mod retriever;
pub mod vector_store;

pub use corpus::{Chunk, CorpusError, Document};
pub use error::{IndexError, Result};
