use super::*;

#[test]
fn api_error_displays_api_message() {
    let err = LlmError::Api { status: 429, message: "rate limited".into() };
    assert_eq!(err.to_string(), "rate limited");
}

#[test]
fn missing_credential_message_asks_for_key() {
    assert_eq!(LlmError::MissingCredential.to_string(), "Please enter your Gemini API key first");
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::MissingCredential.error_code(), "E_MISSING_CREDENTIAL");
    assert_eq!(LlmError::Transport("x".into()).error_code(), "E_TRANSPORT");
    assert_eq!(LlmError::Api { status: 400, message: "bad".into() }.error_code(), "E_API_RESPONSE");
    assert_eq!(LlmError::MalformedResponse.error_code(), "E_MALFORMED_RESPONSE");
    assert_eq!(LlmError::HttpClientBuild("x".into()).error_code(), "E_HTTP_CLIENT_BUILD");
    assert_eq!(LlmError::ConfigParse("x".into()).error_code(), "E_CONFIG_PARSE");
}

#[test]
fn retryable_classification() {
    assert!(LlmError::Transport("reset".into()).retryable());
    assert!(LlmError::Api { status: 429, message: String::new() }.retryable());
    assert!(LlmError::Api { status: 503, message: String::new() }.retryable());
    assert!(!LlmError::Api { status: 400, message: String::new() }.retryable());
    assert!(!LlmError::MissingCredential.retryable());
    assert!(!LlmError::MalformedResponse.retryable());
}
