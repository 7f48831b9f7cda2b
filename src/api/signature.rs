use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::BotError;

fn keyed_mac(channel_secret: &str) -> Result<Hmac<Sha256>, BotError> {
    Hmac::<Sha256>::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| BotError::SignatureError(format!("Failed to create HMAC: {e}")))
}

/// Checks `X-Line-Signature`: base64 of HMAC-SHA256 over the raw body,
/// keyed with the channel secret.
///
/// # Errors
///
/// Returns [`BotError::SignatureError`] when the header is not base64 or
/// does not match the body.
pub fn verify_line_signature(
    request_body: &str,
    signature: &str,
    channel_secret: &str,
) -> Result<(), BotError> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|_| BotError::SignatureError("header is not valid base64".to_string()))?;

    let mut mac = keyed_mac(channel_secret)?;
    mac.update(request_body.as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| BotError::SignatureError("signature does not match body".to_string()))
}

/// Signs `request_body` the way LINE does.
///
/// # Errors
///
/// Returns an error if the HMAC cannot be keyed.
pub fn compute_signature(request_body: &str, channel_secret: &str) -> Result<String, BotError> {
    let mut mac = keyed_mac(channel_secret)?;
    mac.update(request_body.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
