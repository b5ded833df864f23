use super::*;

#[derive(Debug, thiserror::Error)]
#[error("boom: {0}")]
struct Boom(&'static str);

impl ErrorCode for Boom {
    fn error_code(&self) -> &'static str {
        "E_BOOM"
    }
}

#[test]
fn from_error_uses_display_and_code() {
    let notice = Notice::from_error(&Boom("disk"));
    assert!(notice.is_error());
    assert_eq!(notice.title, "Error");
    assert_eq!(notice.description, "boom: disk");
    assert_eq!(notice.code, Some("E_BOOM"));
}

#[test]
fn retryable_defaults_to_false() {
    assert!(!Boom("x").retryable());
}

#[test]
fn info_notice_has_no_code() {
    let notice = Notice::info("Saved", "API key stored");
    assert!(!notice.is_error());
    assert_eq!(notice.code, None);
    assert_eq!(notice.description, "API key stored");
}
