use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Completion, Model};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

/// A scripted model for tests. Returns pre-defined replies in order and
/// records every prompt it was given.
pub struct MockModel {
    replies: Vec<Reply>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model that answers once with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Reply::Text(text.into())])
    }

    /// A model whose single call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(vec![Reply::Fail(message.into())])
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate(&self, prompt: &str) -> Result<Completion> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .get(i)
            .ok_or_else(|| anyhow::anyhow!("MockModel: no more replies (called {} times)", i + 1))?;
        match reply {
            Reply::Text(text) => Ok(Completion::text(text.clone())),
            Reply::Fail(message) => anyhow::bail!("{}", message),
        }
    }
}
