/// News digest bot - a LINE chatbot that emails summaries of recent news.
///
/// A user subscribes in chat, confirms an email address, then sends search
/// queries. For each query the bot fetches recent articles, summarizes the
/// top few with an LLM and emails one summary per article.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda behind API Gateway for the LINE webhook
/// - A per-user conversation state machine held in the warm Lambda process
/// - The Naver Search API for news, `OpenAI` for summaries, SMTP for email
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use newsdigest::core::config::AppConfig;
/// use newsdigest::NewsBot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     newsdigest::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let bot = NewsBot::new(&config)?;
///
///     // Walk one user through the dialog
///     let reply = bot.engine().handle("U123", "구독").await;
///     println!("{}", reply.text);
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod bot;
pub mod conversation;
pub mod core;
pub mod digest;
pub mod errors;
pub mod line;
pub mod mail;
pub mod news;
pub mod utils;

pub use bot::NewsBot;
pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at startup.
///
/// # Example
///
/// ```
/// newsdigest::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    // A second call (e.g. from another test) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
