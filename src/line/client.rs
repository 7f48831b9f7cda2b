//! LINE Messaging API client module
//!
//! Sends replies with retry on transport errors and server-side failures.

use reqwest::Client;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use super::message_builder::reply_payload;
use crate::conversation::Reply;
use crate::errors::BotError;

const LINE_REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Whether a failed call is worth repeating. Client errors (expired reply
/// token, bad payload) are final.
#[must_use]
pub fn is_retryable(error: &BotError) -> bool {
    matches!(error, BotError::HttpError(_) | BotError::Timeout(_))
}

const MAX_RETRIES: usize = 5;

/// 100ms, 200ms, 400ms, ... capped at two seconds.
fn backoff() -> ExponentialBackoff {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(2))
}

/// LINE API client with retry logic and error handling
pub struct LineClient {
    access_token: String,
    reply_endpoint: String,
}

impl LineClient {
    #[must_use]
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            reply_endpoint: LINE_REPLY_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_reply_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.reply_endpoint = endpoint.into();
        self
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, BotError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, BotError>> + Send,
        T: Send,
    {
        let strategy = backoff().map(jitter).take(MAX_RETRIES);

        RetryIf::spawn(strategy, operation, is_retryable).await
    }

    async fn post_json(&self, url: &str, payload: &Value) -> Result<(), BotError> {
        let response = HTTP_CLIENT
            .post(url)
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        if status.is_server_error() {
            warn!("LINE API returned {}, will retry: {}", status, body);
            Err(BotError::HttpError(format!(
                "LINE API returned status {status}: {body}"
            )))
        } else {
            Err(BotError::LineApiError(format!("status {status}: {body}")))
        }
    }

    /// Answers a webhook event using its reply token.
    ///
    /// # Errors
    ///
    /// Returns an error if the LINE API rejects the reply or stays
    /// unreachable after retries.
    pub async fn reply(&self, reply_token: &str, reply: &Reply) -> Result<(), BotError> {
        let payload = reply_payload(reply_token, reply);
        self.with_retry(|| self.post_json(&self.reply_endpoint, &payload))
            .await?;
        info!("Reply sent via LINE Messaging API");
        Ok(())
    }
}
