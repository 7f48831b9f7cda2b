//! Builders for LINE Messaging API message objects.
//!
//! A [`Reply`] with quick replies becomes a `confirm` template so both
//! choices show up as buttons; anything else is a plain `text` message.

use serde_json::{Value, json};

use crate::conversation::Reply;

/// LINE rejects text messages longer than this.
pub const MAX_TEXT_LENGTH: usize = 5_000;

/// Limit on the `text` of a confirm template.
pub const MAX_CONFIRM_TEXT_LENGTH: usize = 240;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Create a plain text message object.
///
/// # Examples
///
/// ```
/// use newsdigest::line::message_builder::text_message;
///
/// let message = text_message("hello");
/// assert_eq!(message["type"], "text");
/// ```
#[must_use]
pub fn text_message(text: &str) -> Value {
    json!({
        "type": "text",
        "text": truncate_chars(text, MAX_TEXT_LENGTH)
    })
}

#[must_use]
pub fn reply_message(reply: &Reply) -> Value {
    let Some(quick) = &reply.quick_replies else {
        return text_message(&reply.text);
    };

    let actions: Vec<Value> = quick
        .choices
        .iter()
        .map(|choice| {
            json!({
                "type": "message",
                "label": choice.label,
                "text": choice.text
            })
        })
        .collect();

    json!({
        "type": "template",
        "altText": quick.alt_text,
        "template": {
            "type": "confirm",
            "text": truncate_chars(&reply.text, MAX_CONFIRM_TEXT_LENGTH),
            "actions": actions
        }
    })
}

/// Body for `POST /v2/bot/message/reply`.
#[must_use]
pub fn reply_payload(reply_token: &str, reply: &Reply) -> Value {
    json!({
        "replyToken": reply_token,
        "messages": [reply_message(reply)]
    })
}
