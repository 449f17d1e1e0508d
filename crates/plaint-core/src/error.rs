use plaint_index::IndexError;
use plaint_llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] IndexError),

    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),
}
