use newsdigest::BotError;
use newsdigest::api::signature::{compute_signature, verify_line_signature};

#[test]
fn test_compute_signature_matches_known_vector() {
    // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog"), base64
    let sig = compute_signature("The quick brown fox jumps over the lazy dog", "key").unwrap();
    assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
}

#[test]
fn test_verify_accepts_own_signature() {
    let body = r#"{"events":[]}"#;
    let sig = compute_signature(body, "secret").unwrap();
    assert!(verify_line_signature(body, &sig, "secret").is_ok());
    assert!(verify_line_signature(body, &format!(" {sig}\n"), "secret").is_ok());
}

#[test]
fn test_verify_rejects_tampered_body() {
    let sig = compute_signature(r#"{"events":[]}"#, "secret").unwrap();
    let err = verify_line_signature(r#"{"events":[1]}"#, &sig, "secret").unwrap_err();
    assert!(matches!(err, BotError::SignatureError(_)));
}

#[test]
fn test_verify_rejects_non_base64_signature() {
    let err = verify_line_signature("{}", "%%%not-base64%%%", "secret").unwrap_err();
    match err {
        BotError::SignatureError(msg) => assert!(msg.contains("base64")),
        other => panic!("unexpected error: {other:?}"),
    }
}
