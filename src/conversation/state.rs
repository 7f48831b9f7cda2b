//! Per-user dialog state.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    #[default]
    Init,
    AwaitingEmail,
    ConfirmingEmail,
    AwaitingQuery,
}

/// Dialog progress for one user.
///
/// Fields only change through the transition methods, which keep
/// `confirmed_email` tied to an accepted confirmation and clear
/// `pending_email` whenever the confirmation step is left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    user_id: String,
    phase: Phase,
    pending_email: Option<String>,
    confirmed_email: Option<String>,
}

impl ConversationState {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            phase: Phase::Init,
            pending_email: None,
            confirmed_email: None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn pending_email(&self) -> Option<&str> {
        self.pending_email.as_deref()
    }

    #[must_use]
    pub fn confirmed_email(&self) -> Option<&str> {
        self.confirmed_email.as_deref()
    }

    pub(crate) fn begin_subscription(&mut self) {
        self.phase = Phase::AwaitingEmail;
    }

    pub(crate) fn propose_email(&mut self, email: &str) {
        self.pending_email = Some(email.to_string());
        self.phase = Phase::ConfirmingEmail;
    }

    pub(crate) fn accept_email(&mut self) {
        self.confirmed_email = self.pending_email.take();
        self.phase = Phase::AwaitingQuery;
    }

    pub(crate) fn reject_email(&mut self) {
        self.pending_email = None;
        self.phase = Phase::Init;
    }
}
