//! Fetch → select → load → summarize → notify for one query/recipient pair.
//!
//! Only the search step can fail the run. A page that cannot be loaded keeps
//! its search snippet; summarize and send failures are recorded on the
//! article's [`DigestResult`] and the loop moves on.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::ai::Summarizer;
use crate::core::config::{AppConfig, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_MAX_ARTICLES};
use crate::core::models::{
    Article, DeliveryOutcome, DigestReport, DigestResult, FailureStage,
};
use crate::errors::BotError;
use crate::mail::Notifier;
use crate::news::NewsFetcher;

#[derive(Debug, Clone)]
pub struct DigestSettings {
    pub sender_address: String,
    pub max_articles: usize,
    pub start_page: u32,
    pub pages: u32,
    pub call_timeout: Duration,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            sender_address: String::new(),
            max_articles: DEFAULT_MAX_ARTICLES,
            start_page: 1,
            pages: 2,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl DigestSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sender_address: config.sender_email.clone(),
            max_articles: config.max_articles,
            call_timeout: config.call_timeout(),
            ..Self::default()
        }
    }
}

pub struct DigestPipeline {
    fetcher: Arc<dyn NewsFetcher>,
    summarizer: Arc<dyn Summarizer>,
    notifier: Arc<dyn Notifier>,
    settings: DigestSettings,
}

impl DigestPipeline {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn NewsFetcher>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn Notifier>,
        settings: DigestSettings,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            notifier,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &DigestSettings {
        &self.settings
    }

    /// Runs one digest and returns a result per selected article.
    ///
    /// # Errors
    ///
    /// Returns an error only when fetching fails or times out.
    pub async fn run(&self, query: &str, recipient: &str) -> Result<Vec<DigestResult>, BotError> {
        let articles = with_timeout(
            "news fetch",
            self.settings.call_timeout,
            self.fetcher
                .fetch(query, self.settings.start_page, self.settings.pages),
        )
        .await?;

        let fetched = articles.len();
        let selected: Vec<Article> = articles
            .into_iter()
            .take(self.settings.max_articles)
            .collect();
        info!(
            query = %query,
            fetched,
            selected = selected.len(),
            "Articles selected for digest"
        );

        let mut results = Vec::with_capacity(selected.len());
        for article in selected {
            results.push(self.process_article(article, recipient).await);
        }

        let report = DigestReport::from_results(&results);
        info!(
            query = %query,
            recipient = %recipient,
            sent = report.sent,
            skipped = report.skipped,
            failed = report.failed,
            "Digest run complete"
        );
        Ok(results)
    }

    async fn load_contents(&self, article: Article) -> Article {
        match with_timeout(
            "article page",
            self.settings.call_timeout,
            self.fetcher.load_contents(article.clone()),
        )
        .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(link = %article.link, "Using search snippet: {}", e);
                article
            }
        }
    }

    async fn process_article(&self, article: Article, recipient: &str) -> DigestResult {
        let article = self.load_contents(article).await;
        let summary = match with_timeout(
            "summarize",
            self.settings.call_timeout,
            self.summarizer.summarize(&article.contents),
        )
        .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!(link = %article.link, "Summarization failed: {}", e);
                return DigestResult {
                    article,
                    summary: String::new(),
                    outcome: DeliveryOutcome::Failed {
                        stage: FailureStage::Summarize,
                        reason: e.to_string(),
                    },
                };
            }
        };

        if summary.trim().is_empty() {
            info!(link = %article.link, "Empty summary, skipping send");
            return DigestResult {
                article,
                summary,
                outcome: DeliveryOutcome::SkippedEmptySummary,
            };
        }

        let outcome = match with_timeout(
            "send email",
            self.settings.call_timeout,
            self.notifier.send(
                &article.title,
                &self.settings.sender_address,
                recipient,
                &summary,
            ),
        )
        .await
        {
            Ok(()) => DeliveryOutcome::Sent,
            Err(e) => {
                warn!(link = %article.link, recipient = %recipient, "Send failed: {}", e);
                DeliveryOutcome::Failed {
                    stage: FailureStage::Send,
                    reason: e.to_string(),
                }
            }
        };

        DigestResult {
            article,
            summary,
            outcome,
        }
    }
}

/// Awaits `fut`, mapping an elapsed `limit` to [`BotError::Timeout`].
pub async fn with_timeout<T, F>(what: &str, limit: Duration, fut: F) -> Result<T, BotError>
where
    F: Future<Output = Result<T, BotError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(BotError::Timeout(format!(
            "{what} exceeded {}ms",
            limit.as_millis()
        ))),
    }
}
