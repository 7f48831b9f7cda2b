//! News search and article retrieval

pub mod naver;

use async_trait::async_trait;

use crate::core::models::Article;
use crate::errors::BotError;

pub use naver::NaverNewsClient;

/// Source of candidate articles for a search query.
///
/// Searching and reading article pages are separate steps so that only the
/// articles a digest actually uses are downloaded.
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    /// Returns articles for `query` in source order, reading `pages` result
    /// pages starting at the 1-based page `start`. The digest asks for
    /// `start = 1, pages = 2`: the first two result pages.
    ///
    /// `contents` holds the search snippet until [`NewsFetcher::load_contents`]
    /// replaces it.
    async fn fetch(&self, query: &str, start: u32, pages: u32) -> Result<Vec<Article>, BotError>;

    /// Replaces `contents` with the full article text.
    async fn load_contents(&self, article: Article) -> Result<Article, BotError> {
        Ok(article)
    }
}
