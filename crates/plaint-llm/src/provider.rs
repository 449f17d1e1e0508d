use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A text-generation and embedding capability.
///
/// Both operations are modeled as expensive, potentially-failing external
/// calls. Implementations must be deterministic for a fixed model version:
/// the same input text always yields the same embedding vector.
pub trait LlmProvider: Send + Sync {
    /// Send messages to the LLM and return the assistant response.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to communicate or the response
    /// is invalid.
    fn chat(
        &self,
        messages: &[Message],
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Embed a single text into a fixed-length vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or returns no embedding.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    /// Embed a batch of texts, order-preserving, one vector per input.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or the response does not
    /// contain exactly one vector per input text.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, LlmError>> + Send;

    fn name(&self) -> &str;
}
