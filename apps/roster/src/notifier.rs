//! # Console Notifier
//!
//! Turns store notifications into tracing events and, unless quiet, one
//! line on stderr per notification.

use roster_core::{Notification, Notifier, Severity, ToastId};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
    quiet: bool,
}

impl ConsoleNotifier {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            quiet,
        }
    }
}

/// Stderr prefix for a severity.
fn badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✗",
        Severity::Info => "i",
        Severity::Warning => "!",
        Severity::Loading => "…",
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let replaces = notification.replaces.map(|t| t.0);

        match notification.severity {
            Severity::Error | Severity::Warning => {
                tracing::warn!(toast = id.0, ?replaces, "{}", notification.message);
            }
            Severity::Loading => {
                tracing::debug!(toast = id.0, "{}", notification.message);
            }
            Severity::Success | Severity::Info => {
                tracing::info!(toast = id.0, ?replaces, "{}", notification.message);
            }
        }

        if !self.quiet {
            eprintln!("{} {}", badge(notification.severity), notification.message);
        }
        id
    }
}
