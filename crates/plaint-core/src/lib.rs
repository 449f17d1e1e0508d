//! Configuration and the question-answering pipeline.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompt;

pub use config::Config;
pub use error::PipelineError;
pub use pipeline::{Answer, RagPipeline};
