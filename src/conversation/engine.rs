use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

use super::replies::{
    ASK_EMAIL, DIGEST_FAILED, EMAIL_CONFIRMED, EMAIL_REJECTED, Reply,
};
use super::state::{ConversationState, Phase};
use crate::core::config::{AppConfig, DEFAULT_AFFIRMATIVE, DEFAULT_NEGATIVE, DEFAULT_SUBSCRIBE_COMMAND};
use crate::core::models::DigestReport;
use crate::digest::DigestPipeline;
use crate::utils::sentences::{SentenceSplitter, contains_command};

#[derive(Debug, Clone)]
pub struct ConversationSettings {
    pub subscribe_command: String,
    pub affirmative: String,
    pub negative: String,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            subscribe_command: DEFAULT_SUBSCRIBE_COMMAND.to_string(),
            affirmative: DEFAULT_AFFIRMATIVE.to_string(),
            negative: DEFAULT_NEGATIVE.to_string(),
        }
    }
}

impl ConversationSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            subscribe_command: config.subscribe_command.clone(),
            ..Self::default()
        }
    }
}

type Slot = Arc<tokio::sync::Mutex<ConversationState>>;

/// Drives the subscription dialog for every user.
///
/// Each user has a slot behind its own async mutex, so messages from one
/// user are handled one at a time in arrival order while different users
/// run concurrently. The registry lock is only held to look up a slot.
pub struct ConversationEngine {
    registry: Mutex<HashMap<String, Slot>>,
    splitter: Arc<dyn SentenceSplitter>,
    pipeline: Arc<DigestPipeline>,
    settings: ConversationSettings,
}

impl ConversationEngine {
    #[must_use]
    pub fn new(
        splitter: Arc<dyn SentenceSplitter>,
        pipeline: Arc<DigestPipeline>,
        settings: ConversationSettings,
    ) -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
            splitter,
            pipeline,
            settings,
        }
    }

    fn slot(&self, user_id: &str) -> Slot {
        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        registry
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(ConversationState::new(user_id))))
            .clone()
    }

    /// Handles one message and returns the reply. Never fails.
    #[tracing::instrument(level = "info", skip(self, text))]
    pub async fn handle(&self, user_id: &str, text: &str) -> Reply {
        let slot = self.slot(user_id);
        let mut state = slot.lock().await;

        let from = state.phase();
        let reply = self.transition(&mut state, text).await;
        info!(from = ?from, to = ?state.phase(), "Conversation step");
        reply
    }

    /// Copy of a user's current state, if the user has been seen.
    pub async fn snapshot(&self, user_id: &str) -> Option<ConversationState> {
        let slot = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()?;
        let state = slot.lock().await;
        Some(state.clone())
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn is_subscribe_command(&self, text: &str) -> bool {
        self.splitter
            .split(text)
            .iter()
            .any(|phrase| contains_command(phrase, &self.settings.subscribe_command))
    }

    async fn transition(&self, state: &mut ConversationState, text: &str) -> Reply {
        match state.phase() {
            Phase::Init if self.is_subscribe_command(text) => {
                state.begin_subscription();
                Reply::text(ASK_EMAIL)
            }
            Phase::AwaitingEmail => {
                state.propose_email(text);
                Reply::confirm_email(&self.settings.affirmative, &self.settings.negative)
            }
            Phase::ConfirmingEmail if text.trim() == self.settings.affirmative => {
                state.accept_email();
                Reply::text(EMAIL_CONFIRMED)
            }
            Phase::ConfirmingEmail if text.trim() == self.settings.negative => {
                state.reject_email();
                Reply::text(EMAIL_REJECTED)
            }
            Phase::AwaitingQuery => {
                let Some(email) = state.confirmed_email().map(ToString::to_string) else {
                    return Reply::not_understood();
                };
                self.run_digest(text, &email).await
            }
            Phase::Init | Phase::ConfirmingEmail => Reply::not_understood(),
        }
    }

    async fn run_digest(&self, query: &str, email: &str) -> Reply {
        match self.pipeline.run(query, email).await {
            Ok(results) => {
                let report = DigestReport::from_results(&results);
                info!(
                    sent = report.sent,
                    skipped = report.skipped,
                    failed = report.failed,
                    "Digest delivered"
                );
                Reply::digest_sent(query, email)
            }
            Err(e) => {
                error!(query = %query, "Digest failed: {}", e);
                Reply::text(DIGEST_FAILED)
            }
        }
    }
}
