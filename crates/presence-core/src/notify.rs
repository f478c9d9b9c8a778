//! User-visible notifications.
//!
//! The API layer reports each failure exactly once through a `Notifier`.
//! The console drains the receiving end and shows the notices as transient
//! toasts.

use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half of the notification channel.
///
/// A disabled notifier drops every notice; that is the default for library
/// users that have no display surface.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notice>>,
}

impl Notifier {
    /// Create a connected notifier and the receiver the UI drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Error, message.into());
    }

    fn send(&self, level: NoticeLevel, message: String) {
        if let Some(ref tx) = self.tx {
            if tx.send(Notice { level, message }).is_err() {
                debug!("Notification receiver dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_delivers_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.error("Failed to fetch employees: boom");
        notifier.success("Employee added successfully!");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, NoticeLevel::Error);
        assert_eq!(first.message, "Failed to fetch employees: boom");
        assert_eq!(rx.try_recv().unwrap().level, NoticeLevel::Success);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        // Nothing to assert beyond not panicking
        Notifier::disabled().error("ignored");
    }
}
