//! Transient user-facing notifications
//!
//! The terminal counterpart of toast messages: every operation reports its
//! outcome as a [`Notification`] and the front-end decides how to show it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// One message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Error notification preferring the backend's own message
    pub fn from_api_error(error: &crate::api::ApiError, fallback: &str) -> Self {
        Self::error(error.backend_message().unwrap_or(fallback))
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.level {
            Level::Success => "✓",
            Level::Info => "ℹ",
            Level::Error => "✕",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

/// Notifications collected while a section is mounted
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Notification>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!(message = %notification.message, "Error notification"),
            _ => tracing::debug!(message = %notification.message, "Notification"),
        }
        self.items.push(notification);
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        for n in notifications {
            self.push(n);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Notification::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Print success/info to stdout and errors to stderr
    pub fn flush_to_terminal(&mut self) {
        for n in self.items.drain(..) {
            if n.is_error() {
                eprintln!("{}", n);
            } else {
                println!("{}", n);
            }
        }
    }
}

impl IntoIterator for Toasts {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_from_api_error_prefers_backend_message() {
        let rejected = ApiError::Rejected {
            message: "Template id not found".to_string(),
        };
        assert_eq!(
            Notification::from_api_error(&rejected, "Failed to send").message,
            "Template id not found"
        );
        assert_eq!(
            Notification::from_api_error(&ApiError::Timeout, "Failed to send").message,
            "Failed to send"
        );
    }

    #[test]
    fn test_toasts_track_errors() {
        let mut toasts = Toasts::new();
        toasts.push(Notification::success("Message sent"));
        assert!(!toasts.has_errors());

        toasts.push(Notification::error("Failed to remove"));
        assert!(toasts.has_errors());
        assert_eq!(toasts.len(), 2);

        toasts.flush_to_terminal();
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Notification::success("done").to_string(), "✓ done");
        assert_eq!(Notification::error("nope").to_string(), "✕ nope");
    }
}
