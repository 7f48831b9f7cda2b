//! Sentence splitting used to spot commands inside free-form chat text.

use once_cell::sync::Lazy;
use regex::Regex;

pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits on line breaks and on sentence terminators followed by whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSplitter;

static BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+|([.!?…。]+)\s+").expect("static regex compile"));

impl SentenceSplitter for HeuristicSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut last = 0;

        for cap in BOUNDARY_RE.captures_iter(text) {
            let Some(whole) = cap.get(0) else { continue };
            // Keep the terminator with the sentence it closes.
            let end = cap.get(1).map_or(whole.start(), |t| t.end());
            phrases.push(&text[last..end]);
            last = whole.end();
        }
        phrases.push(&text[last..]);

        phrases
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Whether `phrase` contains `command` as a whole word.
///
/// Words are runs of alphanumeric characters, so `구독(subscribe)` yields
/// `구독` and `subscribe`, while `구독하기` stays a single word.
#[must_use]
pub fn contains_command(phrase: &str, command: &str) -> bool {
    let command = command.trim();
    if command.is_empty() {
        return false;
    }
    phrase
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == command)
}
