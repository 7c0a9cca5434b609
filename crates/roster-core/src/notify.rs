//! # Notification Side Channel
//!
//! Fire-and-forget, user-facing notifications (toasts).
//!
//! Stores report mutation outcomes here; nothing reads the return value of a
//! notification except [`track`], which uses it to replace a loading toast
//! with the final outcome.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle of a posted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToastId(pub u64);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
    /// A pending operation; replaced once it settles.
    Loading,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    /// A previous notification this one supersedes.
    pub replaces: Option<ToastId>,
}

impl Notification {
    /// Create a notification.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            replaces: None,
        }
    }

    /// Mark this notification as superseding `previous`.
    #[must_use]
    pub const fn replacing(mut self, previous: ToastId) -> Self {
        self.replaces = Some(previous);
        self
    }
}

/// Sink for user-facing notifications.
///
/// Implementations must be `Send + Sync` so a single sink can be shared by
/// every store of an application context.
pub trait Notifier: Send + Sync {
    /// Post a notification and return its handle.
    fn notify(&self, notification: Notification) -> ToastId;

    fn success(&self, message: &str) {
        self.notify(Notification::new(Severity::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(Severity::Error, message));
    }

    fn info(&self, message: &str) {
        self.notify(Notification::new(Severity::Info, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notification::new(Severity::Warning, message));
    }
}

// =============================================================================
// RECORDING NOTIFIER
// =============================================================================

/// Keeps every notification in memory, in posting order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    next_id: AtomicU64,
    log: Mutex<Vec<(ToastId, Notification)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notification posted so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .map(|log| log.iter().map(|(_, n)| n.clone()).collect())
            .unwrap_or_default()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.log
            .lock()
            .ok()
            .and_then(|log| log.last().map(|(_, n)| n.clone()))
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut log) = self.log.lock() {
            log.push((id, notification));
        }
        id
    }
}

// =============================================================================
// PENDING OPERATIONS
// =============================================================================

/// Messages shown while tracking a pending operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessages {
    pub loading: String,
    pub success: String,
    pub error: String,
}

impl PendingMessages {
    #[must_use]
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// Show a loading toast while `operation` runs, then swap it for the outcome.
///
/// The operation's result is returned unchanged.
pub async fn track<T, E, F>(
    notifier: &dyn Notifier,
    operation: F,
    messages: &PendingMessages,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let pending = notifier.notify(Notification::new(Severity::Loading, &messages.loading));
    let result = operation.await;
    let outcome = match &result {
        Ok(_) => Notification::new(Severity::Success, &messages.success),
        Err(_) => Notification::new(Severity::Error, &messages.error),
    };
    notifier.notify(outcome.replacing(pending));
    result
}

// =============================================================================
// TESTS
// =============================================================================
