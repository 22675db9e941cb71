//! User-visible notification seam.
//!
//! Cart operations never surface errors to the caller; every rejected or
//! corrected operation is reported through this fire-and-forget sink (the
//! storefront UI shows these as toasts).

use std::sync::Mutex;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Error,
}

/// Fire-and-forget sink for user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// Notifier that discards every message.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str, _level: NotifyLevel) {}
}

/// Notifier that records every message, for asserting on in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, NotifyLevel)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<(String, NotifyLevel)> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<(String, NotifyLevel)> {
        self.messages().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((message.to_owned(), level));
    }
}
