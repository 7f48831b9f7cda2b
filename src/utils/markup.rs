//! Markup cleanup for search-API snippets and fetched article pages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::BotError;

/// Wrap width used when rendering article pages to plain text.
pub const ARTICLE_TEXT_WIDTH: usize = 120;

/// Upper bound on the characters kept from a rendered article.
pub const MAX_ARTICLE_CHARS: usize = 20_000;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex compile"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));

/// Strips inline tags (the search API wraps matches in `<b>`) and decodes
/// the handful of entities it emits.
#[must_use]
pub fn strip_inline_markup(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, "");
    let decoded = without_tags
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Renders an HTML page to plain text, truncated to [`MAX_ARTICLE_CHARS`].
pub fn html_to_text(html: &str) -> Result<String, BotError> {
    let text = html2text::from_read(html.as_bytes(), ARTICLE_TEXT_WIDTH)
        .map_err(|e| BotError::ParseError(format!("Failed to render article HTML: {e}")))?;
    Ok(text.trim().chars().take(MAX_ARTICLE_CHARS).collect())
}
