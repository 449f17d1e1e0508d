pub mod chunker;
pub mod error;
pub mod loader;
pub mod sampler;
pub mod types;

pub use chunker::{NarrativeSplitter, SplitterConfig};
pub use error::CorpusError;
pub use loader::{clean_narrative, load_csv};
pub use sampler::StratifiedSampler;
pub use types::{Chunk, Document};
