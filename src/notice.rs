//! User-facing notifications.
//!
//! DESIGN
//! ======
//! Every failure that reaches the user is flattened into a single `Notice`
//! (a non-blocking toast in the browser build, a stderr line in the
//! terminal front end). Errors opt in through `ErrorCode`, which gives
//! each variant a stable machine-readable code.

/// Stable error code and retry hint for errors surfaced to the user.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Info,
    Destructive,
}

/// A non-blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
    /// Error code for failures; `None` for informational notices.
    pub code: Option<&'static str>,
}

impl Notice {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { variant: NoticeVariant::Info, title: title.into(), description: description.into(), code: None }
    }

    /// Build an error notice from any coded error. The description is the
    /// error's `Display` text.
    #[must_use]
    pub fn from_error<E: ErrorCode>(err: &E) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: "Error".into(),
            description: err.to_string(),
            code: Some(err.error_code()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod tests;
