//! Outbound email delivery

pub mod smtp;

use async_trait::async_trait;

use crate::errors::BotError;

pub use smtp::{SmtpNotifier, SmtpSettings};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        subject: &str,
        from_address: &str,
        to_address: &str,
        body: &str,
    ) -> Result<(), BotError>;
}
