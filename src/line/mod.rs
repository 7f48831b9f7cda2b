//! All LINE-specific functionality

pub mod client;
pub mod message_builder;

use async_trait::async_trait;

use crate::conversation::Reply;
use crate::errors::BotError;

// Re-export main types for convenience
pub use client::LineClient;

/// Delivers a reply to the event identified by `reply_token`.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, reply_token: &str, reply: &Reply) -> Result<(), BotError>;
}

#[async_trait]
impl ReplySender for LineClient {
    async fn send_reply(&self, reply_token: &str, reply: &Reply) -> Result<(), BotError> {
        self.reply(reply_token, reply).await
    }
}
