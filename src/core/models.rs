use serde::{Deserialize, Serialize};

/// A news article as returned by a [`crate::news::NewsFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub description: String,
    pub contents: String,
}

/// Which step of the per-article digest failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureStage {
    Summarize,
    Send,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    Sent,
    SkippedEmptySummary,
    Failed { stage: FailureStage, reason: String },
}

/// Outcome of processing one article in a digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    pub article: Article,
    pub summary: String,
    pub outcome: DeliveryOutcome,
}

impl DigestResult {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.outcome == DeliveryOutcome::Sent
    }
}

/// Aggregate counts over a digest run, used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestReport {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DigestReport {
    #[must_use]
    pub fn from_results(results: &[DigestResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut report, result| {
                match result.outcome {
                    DeliveryOutcome::Sent => report.sent += 1,
                    DeliveryOutcome::SkippedEmptySummary => report.skipped += 1,
                    DeliveryOutcome::Failed { .. } => report.failed += 1,
                }
                report
            })
    }
}

/// A text message received from a user, after transport verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: String,
    pub reply_token: String,
    pub text: String,
}
