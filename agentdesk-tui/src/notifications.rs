//! Transient toast notifications shown in the footer.

use chrono::{DateTime, Duration, Utc};

/// Older toasts are dropped beyond this many.
pub const MAX_NOTIFICATIONS: usize = 32;

/// How long a toast stays in the footer.
pub const TOAST_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < Duration::seconds(TOAST_SECONDS)
    }
}
