//! Subscription dialog: per-user state machine and replies

pub mod engine;
pub mod replies;
pub mod state;

pub use engine::{ConversationEngine, ConversationSettings};
pub use replies::{QuickReplies, QuickReply, Reply};
pub use state::{ConversationState, Phase};
