use newsdigest::errors::BotError;
use std::error::Error;

#[test]
fn test_bot_error_implements_error_trait() {
    // Verify BotError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::LineApiError("401 Unauthorized".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access LINE API: 401 Unauthorized"
    );

    let error = BotError::OpenAIError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access OpenAI API: Model unavailable"
    );

    let error = BotError::FetchError("search unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to fetch news: search unavailable"
    );

    let error = BotError::Timeout("summarize exceeded 200ms".to_string());
    assert_eq!(format!("{error}"), "Timed out: summarize exceeded 200ms");

    let error = BotError::SignatureError("signature does not match body".to_string());
    assert_eq!(
        format!("{error}"),
        "Webhook signature rejected: signature does not match body"
    );

    let error = BotError::ConfigError("SMTP_HOST is not set".to_string());
    assert_eq!(format!("{error}"), "Invalid configuration: SMTP_HOST is not set");
}

#[test]
fn test_bot_error_from_conversions() {
    let address_err = "not an address"
        .parse::<lettre::Address>()
        .expect_err("invalid address");
    match BotError::from(address_err) {
        BotError::NotifyError(msg) => assert!(msg.starts_with("Invalid address")),
        other => panic!("Unexpected error type: {other:?}"),
    }

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        // Never called; only checks that the conversion exists
        BotError::from(err)
    }
}
