use serde::Deserialize;

use crate::core::models::InboundMessage;
use crate::errors::BotError;

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// The text message this event carries, if it is one from a known user.
    #[must_use]
    pub fn into_text_message(self) -> Option<InboundMessage> {
        if self.event_type != "message" {
            return None;
        }
        let message = self.message.filter(|m| m.message_type == "text")?;
        let user_id = self.source.and_then(|s| s.user_id)?;
        Some(InboundMessage {
            user_id,
            reply_token: self.reply_token.unwrap_or_default(),
            text: message.text.unwrap_or_default(),
        })
    }
}

/// Parses a webhook body into the text messages it carries, in order.
pub fn parse_webhook_body(body: &str) -> Result<Vec<InboundMessage>, BotError> {
    let parsed: WebhookBody = serde_json::from_str(body)
        .map_err(|e| BotError::ParseError(format!("Invalid webhook JSON: {}", e)))?;
    Ok(parsed
        .events
        .into_iter()
        .filter_map(WebhookEvent::into_text_message)
        .collect())
}

pub fn get_header_value<'a>(headers: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
