//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;

use async_trait::async_trait;

use crate::errors::BotError;

// Re-export main types for convenience
pub use client::{LlmClient, estimate_tokens};

/// Condenses article text. An empty result means "nothing worth sending".
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, BotError>;
}
