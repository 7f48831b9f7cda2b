use std::env;
use std::time::Duration;

use crate::errors::BotError;

pub const DEFAULT_SUBSCRIBE_COMMAND: &str = "구독";
pub const DEFAULT_AFFIRMATIVE: &str = "네";
pub const DEFAULT_NEGATIVE: &str = "아니오";
pub const DEFAULT_MAX_ARTICLES: usize = 5;
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub naver_client_id: String,
    pub naver_client_secret: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub sender_email: String,
    pub subscribe_command: String,
    pub max_articles: usize,
    pub call_timeout_secs: u64,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigError`] naming the first variable that is
    /// missing or malformed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any name → value source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| BotError::ConfigError(format!("{name} is not set")))
        };

        Ok(Self {
            line_channel_secret: required("LINE_CHANNEL_SECRET")?,
            line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: lookup("OPENAI_ORG_ID"),
            openai_model: lookup("OPENAI_MODEL"),
            naver_client_id: required("NAVER_CLIENT_ID")?,
            naver_client_secret: required("NAVER_CLIENT_SECRET")?,
            smtp_host: required("SMTP_HOST")?,
            smtp_port: parse_or_default("SMTP_PORT", lookup("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            smtp_username: required("SMTP_USERNAME")?,
            smtp_password: required("SMTP_PASSWORD")?,
            sender_email: required("DIGEST_SENDER_EMAIL")?,
            subscribe_command: lookup("SUBSCRIBE_COMMAND")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUBSCRIBE_COMMAND.to_string()),
            max_articles: parse_or_default(
                "DIGEST_MAX_ARTICLES",
                lookup("DIGEST_MAX_ARTICLES"),
                DEFAULT_MAX_ARTICLES,
            )?,
            call_timeout_secs: parse_or_default(
                "EXTERNAL_CALL_TIMEOUT_SECS",
                lookup("EXTERNAL_CALL_TIMEOUT_SECS"),
                DEFAULT_CALL_TIMEOUT_SECS,
            )?,
        })
    }

    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// Parses an optional environment value, falling back to `default` when unset.
///
/// # Errors
///
/// Returns [`BotError::ConfigError`] when a value is present but does not parse.
pub fn parse_or_default<T>(name: &str, raw: Option<String>, default: T) -> Result<T, BotError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| BotError::ConfigError(format!("{}: {}", name, e))),
    }
}
