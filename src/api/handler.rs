//! API Lambda handler - thin router in front of [`NewsBot`].
//!
//! This module handles:
//! - The `/test` health probe
//! - Request validation (headers, body)
//! - Handing verified webhook bodies to the bot

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Error, LambdaEvent};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::bot::NewsBot;
use crate::core::config::AppConfig;

pub use self::function_handler as handler;

// Conversation state lives as long as the warm Lambda process.
static BOT: OnceCell<NewsBot> = OnceCell::new();

fn bot() -> Result<&'static NewsBot, Error> {
    BOT.get_or_try_init(|| {
        let config = AppConfig::from_env().map_err(|e| {
            error!("Config error: {}", e);
            Error::from(e)
        })?;
        NewsBot::new(&config).map_err(|e| {
            error!("Failed to initialize bot: {}", e);
            Error::from(format!("Bot Initialization Error: {e}"))
        })
    })
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error only when configuration or client setup fails; request
/// problems are answered with 4xx payloads.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let path = request_path(&event.payload).unwrap_or("");
    info!(raw_path = %path, "API Lambda received request");

    if path.ends_with("/test") {
        return Ok(helpers::ok_text("test"));
    }

    let bot = bot()?;

    let Some(headers) = event.payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    let body = match extract_body(&event.payload) {
        Ok(b) => b,
        Err(response) => return Ok(response),
    };

    let signature = parsing::get_header_value(headers, "X-Line-Signature");
    Ok(bot.handle_webhook(&body, signature).await)
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(|v| v.as_str())
        .or_else(|| payload.get("path").and_then(|v| v.as_str()))
}

/// Returns the raw request body, decoding it when API Gateway base64-encoded it.
pub fn extract_body(payload: &Value) -> Result<String, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !is_base64 {
        return Ok(body_str.to_string());
    }

    STANDARD
        .decode(body_str)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| {
            error!("Request body is not valid base64 UTF-8");
            helpers::err_response(400, "Invalid body encoding")
        })
}
