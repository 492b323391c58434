use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A user-facing status message.
///
/// Transient notifications expire on their own; persistent ones stay until
/// dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
    expires_at: Option<Instant>,
}

impl Notification {
    pub fn transient(severity: Severity, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            severity,
            text: text.into(),
            expires_at: Some(Instant::now() + ttl),
        }
    }

    pub fn persistent(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            expires_at: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.expires_at.is_none()
    }

    pub fn is_visible(&self) -> bool {
        self.expires_at.map_or(true, |deadline| Instant::now() < deadline)
    }
}
