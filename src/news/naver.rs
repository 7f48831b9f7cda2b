//! Naver Search news client
//!
//! Pages through the news search API. The readable text of an article page
//! is only pulled when a digest selects that article.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use super::NewsFetcher;
use crate::core::models::Article;
use crate::errors::BotError;
use crate::utils::markup::{html_to_text, strip_inline_markup};

const NAVER_NEWS_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";

/// Items requested per result page.
pub const RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct NaverSearchResponse {
    #[serde(default)]
    pub items: Vec<NaverNewsItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaverNewsItem {
    pub title: String,
    #[serde(default)]
    pub originallink: String,
    pub link: String,
    #[serde(default)]
    pub description: String,
}

pub struct NaverNewsClient {
    http: Client,
    client_id: String,
    client_secret: String,
    endpoint: String,
}

impl NaverNewsClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build news HTTP client: {e}")))?;
        Ok(Self {
            http,
            client_id,
            client_secret,
            endpoint: NAVER_NEWS_ENDPOINT.to_string(),
        })
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn search_page(&self, query: &str, page: u32) -> Result<Vec<NaverNewsItem>, BotError> {
        let start = page_start(page);
        let response = self
            .http
            .get(&self.endpoint)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[
                ("query", query.to_string()),
                ("display", RESULTS_PER_PAGE.to_string()),
                ("start", start.to_string()),
                ("sort", "date".to_string()),
            ])
            .send()
            .await
            .map_err(|e| BotError::FetchError(format!("News search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            return Err(BotError::FetchError(format!(
                "News search returned status {status}: {body}"
            )));
        }

        let parsed: NaverSearchResponse = response
            .json()
            .await
            .map_err(|e| BotError::FetchError(format!("Invalid news search response: {e}")))?;
        Ok(parsed.items)
    }

    async fn article_text(&self, link: &str) -> Result<String, BotError> {
        let response = self.http.get(link).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BotError::HttpError(format!(
                "Article page {link} returned status {status}"
            )));
        }
        let html = response.text().await?;
        html_to_text(&html)
    }

    fn to_article(item: NaverNewsItem) -> Article {
        let link = preferred_link(&item);
        let description = strip_inline_markup(&item.description);
        Article {
            title: strip_inline_markup(&item.title),
            link,
            contents: description.clone(),
            description,
        }
    }
}

#[async_trait]
impl NewsFetcher for NaverNewsClient {
    async fn fetch(&self, query: &str, start: u32, pages: u32) -> Result<Vec<Article>, BotError> {
        let mut items = Vec::new();
        for page in start.max(1)..start.max(1) + pages {
            items.extend(self.search_page(query, page).await?);
        }

        let items = dedup_by_link(items);
        info!(query = %query, hits = items.len(), "News search complete");

        Ok(items.into_iter().map(Self::to_article).collect())
    }

    async fn load_contents(&self, mut article: Article) -> Result<Article, BotError> {
        let text = self.article_text(&article.link).await?;
        if text.is_empty() {
            warn!(link = %article.link, "Article page has no text, keeping description");
        } else {
            article.contents = text;
        }
        Ok(article)
    }
}

/// 1-based item offset of a 1-based result page.
#[must_use]
pub fn page_start(page: u32) -> u32 {
    page.saturating_sub(1) * RESULTS_PER_PAGE + 1
}

/// Uses the Naver-hosted link when it is a web URL, else the publisher's.
#[must_use]
pub fn preferred_link(item: &NaverNewsItem) -> String {
    let is_web = |s: &str| {
        Url::parse(s)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
    };
    if is_web(&item.link) || item.originallink.is_empty() {
        item.link.clone()
    } else {
        item.originallink.clone()
    }
}

/// Drops later items whose link was already seen, keeping source order.
#[must_use]
pub fn dedup_by_link(items: Vec<NaverNewsItem>) -> Vec<NaverNewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(preferred_link(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str, original: &str) -> NaverNewsItem {
        NaverNewsItem {
            title: "t".into(),
            originallink: original.into(),
            link: link.into(),
            description: String::new(),
        }
    }

    #[test]
    fn page_start_is_one_based() {
        assert_eq!(page_start(1), 1);
        assert_eq!(page_start(2), 11);
        assert_eq!(page_start(0), 1);
    }

    #[test]
    fn parses_search_response() {
        let body = r#"{
            "lastBuildDate": "Mon, 19 Oct 2026 10:00:00 +0900",
            "total": 2, "start": 1, "display": 2,
            "items": [
                {"title": "<b>선거</b> 결과", "originallink": "https://press.example/1",
                 "link": "https://n.news.naver.com/1", "description": "요약", "pubDate": "x"}
            ]
        }"#;
        let parsed: NaverSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].link, "https://n.news.naver.com/1");
    }

    #[test]
    fn preferred_link_falls_back_to_original() {
        assert_eq!(
            preferred_link(&item("https://n.news.naver.com/1", "https://p/1")),
            "https://n.news.naver.com/1"
        );
        assert_eq!(preferred_link(&item("not a url", "https://p/1")), "https://p/1");
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let items = vec![
            item("https://a/1", ""),
            item("https://a/2", ""),
            item("https://a/1", ""),
            item("https://a/3", ""),
        ];
        let links: Vec<_> = dedup_by_link(items).into_iter().map(|i| i.link).collect();
        assert_eq!(links, vec!["https://a/1", "https://a/2", "https://a/3"]);
    }
}
