#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("input collection is empty, nothing to process")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid chunker config: overlap {overlap} must be smaller than chunk size {size}")]
    InvalidOverlap { size: usize, overlap: usize },
}
