//! Notification sink for user-facing outcomes
//!
//! Every user-visible outcome of a session operation flows through one
//! [`Notifier`], so a UI layer (console, toast bar, test harness) decides
//! presentation while the session decides content and severity.

use std::sync::Mutex;

/// Severity of a notification, in the sense of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Sink for transient user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Discards every notification. Default sink for embedders that only
/// consume the typed results of session operations.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

/// Prints notifications to the terminal, errors going to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => println!("✓ {message}"),
            Severity::Error => eprintln!("Error: {message}"),
            Severity::Info => println!("ℹ {message}"),
        }
    }
}

/// Records notifications for later inspection. Intended for tests of
/// session wiring.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, in order.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages of one severity, in order.
    pub fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
