use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse webhook event: {0}")]
    ParseError(String),

    #[error("Webhook signature rejected: {0}")]
    SignatureError(String),

    #[error("Failed to fetch news: {0}")]
    FetchError(String),

    #[error("Failed to summarize article: {0}")]
    SummarizeError(String),

    #[error("Failed to send email: {0}")]
    NotifyError(String),

    #[error("Failed to access LINE API: {0}")]
    LineApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<lettre::error::Error> for BotError {
    fn from(error: lettre::error::Error) -> Self {
        BotError::NotifyError(format!("Failed to build message: {}", error))
    }
}

impl From<lettre::address::AddressError> for BotError {
    fn from(error: lettre::address::AddressError) -> Self {
        BotError::NotifyError(format!("Invalid address: {}", error))
    }
}

impl From<lettre::transport::smtp::Error> for BotError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        BotError::NotifyError(format!("SMTP error: {}", error))
    }
}
