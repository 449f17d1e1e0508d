//! Test-only mock LLM provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

#[derive(Debug, Clone)]
pub struct MockProvider {
    pub response: String,
    pub dimensions: usize,
    pub fail_chat: bool,
    pub fail_embed: bool,
    pub fail_embed_batch: bool,
    embed_calls: Arc<AtomicUsize>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            response: "mock response".into(),
            dimensions: 8,
            fail_chat: false,
            fail_embed: false,
            fail_embed_batch: false,
            embed_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_chat() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_embed() -> Self {
        Self {
            fail_embed: true,
            ..Self::default()
        }
    }

    /// Fails batch embeddings only; single embeds keep working.
    #[must_use]
    pub fn failing_embed_batch() -> Self {
        Self {
            fail_embed_batch: true,
            ..Self::default()
        }
    }

    /// Number of embedding calls made so far (single and batch alike).
    #[must_use]
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    // Deterministic pseudo-embedding: each dimension mixes the byte sum of
    // the text with its position, so distinct texts map to distinct vectors.
    fn vector_for(&self, text: &str) -> Vec<f32> {
        let sum: u32 = text.bytes().map(u32::from).sum();
        (0..self.dimensions)
            .map(|i| {
                let x = sum.wrapping_mul(31).wrapping_add(i as u32) % 101;
                f32::from(u16::try_from(x).unwrap_or(0)) / 101.0
            })
            .collect()
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, _messages: &[Message]) -> Result<String, LlmError> {
        if self.fail_chat {
            return Err(LlmError::Other("mock LLM error".into()));
        }
        Ok(self.response.clone())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_embed {
            return Err(LlmError::Other("mock embed error".into()));
        }
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_embed || self.fail_embed_batch {
            return Err(LlmError::Other("mock embed error".into()));
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}
