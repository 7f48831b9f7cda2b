#![allow(dead_code)]

pub mod http;

use async_trait::async_trait;
use newsdigest::ai::Summarizer;
use newsdigest::conversation::{ConversationEngine, ConversationSettings, Reply};
use newsdigest::core::models::Article;
use newsdigest::digest::{DigestPipeline, DigestSettings};
use newsdigest::errors::BotError;
use newsdigest::line::ReplySender;
use newsdigest::mail::Notifier;
use newsdigest::news::NewsFetcher;
use newsdigest::utils::sentences::HeuristicSplitter;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SENDER: &str = "digest@example.com";

pub fn article(n: usize, contents: &str) -> Article {
    Article {
        title: format!("title {n}"),
        link: format!("https://news.example/{n}"),
        description: format!("description {n}"),
        contents: contents.to_string(),
    }
}

/// Returns a fixed batch, or a fetch error when `fail` is set.
///
/// Loading a page leaves the article unchanged, except that links in
/// `slow_links` hang and links in `broken_links` fail.
#[derive(Default)]
pub struct FakeFetcher {
    pub articles: Vec<Article>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub slow_links: Vec<String>,
    pub broken_links: Vec<String>,
    pub calls: Mutex<Vec<(String, u32, u32)>>,
    pub loaded: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl NewsFetcher for FakeFetcher {
    async fn fetch(&self, query: &str, start: u32, pages: u32) -> Result<Vec<Article>, BotError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), start, pages));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BotError::FetchError("search unavailable".to_string()));
        }
        Ok(self.articles.clone())
    }

    async fn load_contents(&self, article: Article) -> Result<Article, BotError> {
        self.loaded.lock().unwrap().push(article.link.clone());
        if self.slow_links.contains(&article.link) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        if self.broken_links.contains(&article.link) {
            return Err(BotError::HttpError("page unavailable".to_string()));
        }
        Ok(article)
    }
}

/// Summaries are driven by the article contents:
/// `"empty"` summarizes to nothing, `"boom"` fails, `"slow"` hangs,
/// anything else becomes `"summary of <contents>"`.
#[derive(Default)]
pub struct FakeSummarizer {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, BotError> {
        self.calls.lock().unwrap().push(text.to_string());
        match text {
            "empty" => Ok(String::new()),
            "boom" => Err(BotError::SummarizeError("model error".to_string())),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("late".to_string())
            }
            other => Ok(format!("summary of {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Records every send attempt; subjects listed in `fail_subjects` fail.
#[derive(Default)]
pub struct RecordingNotifier {
    pub attempts: Mutex<Vec<SentMail>>,
    pub fail_subjects: Vec<String>,
}

impl RecordingNotifier {
    pub fn attempts(&self) -> Vec<SentMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        subject: &str,
        from_address: &str,
        to_address: &str,
        body: &str,
    ) -> Result<(), BotError> {
        self.attempts.lock().unwrap().push(SentMail {
            subject: subject.to_string(),
            from: from_address.to_string(),
            to: to_address.to_string(),
            body: body.to_string(),
        });
        if self.fail_subjects.iter().any(|s| s == subject) {
            return Err(BotError::NotifyError("mailbox unavailable".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReplier {
    pub replies: Mutex<Vec<(String, Reply)>>,
}

impl RecordingReplier {
    pub fn replies(&self) -> Vec<(String, Reply)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for RecordingReplier {
    async fn send_reply(&self, reply_token: &str, reply: &Reply) -> Result<(), BotError> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), reply.clone()));
        Ok(())
    }
}

pub fn settings() -> DigestSettings {
    DigestSettings {
        sender_address: SENDER.to_string(),
        call_timeout: Duration::from_millis(200),
        ..DigestSettings::default()
    }
}

pub fn pipeline(
    fetcher: Arc<FakeFetcher>,
    summarizer: Arc<FakeSummarizer>,
    notifier: Arc<RecordingNotifier>,
) -> DigestPipeline {
    DigestPipeline::new(fetcher, summarizer, notifier, settings())
}

pub fn engine_with(
    fetcher: Arc<FakeFetcher>,
    summarizer: Arc<FakeSummarizer>,
    notifier: Arc<RecordingNotifier>,
) -> ConversationEngine {
    ConversationEngine::new(
        Arc::new(HeuristicSplitter),
        Arc::new(pipeline(fetcher, summarizer, notifier)),
        ConversationSettings::default(),
    )
}

pub fn engine() -> ConversationEngine {
    engine_with(
        Arc::new(FakeFetcher::default()),
        Arc::new(FakeSummarizer::default()),
        Arc::new(RecordingNotifier::default()),
    )
}
