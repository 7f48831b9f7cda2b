//! Wires the collaborators together and handles verified webhook bodies.

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::ai::LlmClient;
use crate::ai::client::DEFAULT_MODEL;
use crate::api::{helpers, parsing, signature};
use crate::conversation::{ConversationEngine, ConversationSettings};
use crate::core::config::AppConfig;
use crate::core::models::InboundMessage;
use crate::digest::{DigestPipeline, DigestSettings};
use crate::errors::BotError;
use crate::line::{LineClient, ReplySender};
use crate::mail::{SmtpNotifier, SmtpSettings};
use crate::news::NaverNewsClient;
use crate::utils::sentences::HeuristicSplitter;

pub struct NewsBot {
    engine: ConversationEngine,
    replier: Arc<dyn ReplySender>,
    channel_secret: String,
}

impl NewsBot {
    /// Builds the bot with the production clients described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP or SMTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let fetcher = NaverNewsClient::new(
            config.naver_client_id.clone(),
            config.naver_client_secret.clone(),
            config.call_timeout(),
        )?;
        let model = config
            .openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let summarizer = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            model,
            config.call_timeout(),
        )?;
        let notifier = SmtpNotifier::new(&SmtpSettings::from_config(config))?;

        let pipeline = DigestPipeline::new(
            Arc::new(fetcher),
            Arc::new(summarizer),
            Arc::new(notifier),
            DigestSettings::from_config(config),
        );
        let engine = ConversationEngine::new(
            Arc::new(HeuristicSplitter),
            Arc::new(pipeline),
            ConversationSettings::from_config(config),
        );

        Ok(Self::from_parts(
            engine,
            Arc::new(LineClient::new(config.line_channel_access_token.clone())),
            config.line_channel_secret.clone(),
        ))
    }

    #[must_use]
    pub fn from_parts(
        engine: ConversationEngine,
        replier: Arc<dyn ReplySender>,
        channel_secret: String,
    ) -> Self {
        Self {
            engine,
            replier,
            channel_secret,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    /// Verifies and dispatches one webhook delivery, returning the HTTP
    /// response for API Gateway.
    pub async fn handle_webhook(&self, body: &str, line_signature: Option<&str>) -> Value {
        let verified = line_signature
            .ok_or_else(|| BotError::SignatureError("missing X-Line-Signature header".to_string()))
            .and_then(|sig| signature::verify_line_signature(body, sig, &self.channel_secret));
        if let Err(e) = verified {
            error!("Rejected webhook: {}", e);
            return helpers::err_response(401, &e.to_string());
        }

        let messages = match parsing::parse_webhook_body(body) {
            Ok(messages) => messages,
            Err(e) => {
                error!("Webhook parse error: {}", e);
                return helpers::err_response(400, &format!("Parse Error: {e}"));
            }
        };

        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!("webhook", correlation_id = %correlation_id);
        async {
            let queues = group_by_user(messages);
            info!(users = queues.len(), "Dispatching text messages");
            join_all(queues.into_iter().map(|queue| self.handle_user_messages(queue))).await;
        }
        .instrument(span)
        .await;

        helpers::ok_empty()
    }

    /// Handles one user's messages in arrival order, replying to each as
    /// soon as its turn is done.
    async fn handle_user_messages(&self, queue: Vec<InboundMessage>) {
        for message in queue {
            let reply = self.engine.handle(&message.user_id, &message.text).await;

            if message.reply_token.is_empty() {
                warn!(user_id = %message.user_id, "Event has no reply token, dropping reply");
                continue;
            }
            if let Err(e) = self.replier.send_reply(&message.reply_token, &reply).await {
                error!(user_id = %message.user_id, "Failed to send reply: {}", e);
            }
        }
    }
}

/// Splits messages into per-user queues. Users appear in order of their
/// first message and each queue keeps arrival order.
fn group_by_user(messages: Vec<InboundMessage>) -> Vec<Vec<InboundMessage>> {
    let mut queues: Vec<Vec<InboundMessage>> = Vec::new();
    for message in messages {
        match queues
            .iter_mut()
            .find(|queue| queue[0].user_id == message.user_id)
        {
            Some(queue) => queue.push(message),
            None => queues.push(vec![message]),
        }
    }
    queues
}
