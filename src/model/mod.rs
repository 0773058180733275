pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

/// Token usage from a single model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Total tokens (input + output).
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Raw reply text from one model call, plus usage if the provider reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}

/// A text-generation backend. One prompt in, one completion out.
///
/// Any failure (transport, auth, quota, timeout, empty reply) is an `Err`.
/// Implementations make exactly one attempt.
#[async_trait]
pub trait Model: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Completion>;
}
