//! Text completion backends.
//!
//! The summarization and question answering pipelines only need one thing
//! from a model: turn a prompt into a reply.

mod openai;
#[cfg(test)]
pub(crate) mod scripted;

pub use openai::OpenAICompleter;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for prompt-to-text completion.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Send a single prompt and return the model's reply.
    ///
    /// Fails with `Completion` when the backend call fails.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for display.
    fn model(&self) -> &str;
}
