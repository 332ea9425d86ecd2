use std::fmt;
use std::time::{Duration, Instant};

/// How a notification is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Holds at most one notification and expires it after a fixed interval.
#[derive(Debug)]
pub struct NotificationPresenter {
    current: Option<Notification>,
    ttl: Duration,
}

impl NotificationPresenter {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces whatever is showing with `message`.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, at: Instant) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!("🔔 [{}] {}", severity, message),
            _ => tracing::info!("🔔 [{}] {}", severity, message),
        }
        self.current = Some(Notification {
            message,
            severity,
            shown_at: at,
        });
    }

    /// Explicit user dismissal.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The notification still visible at `now`, if any. Expired entries are dropped.
    pub fn visible_at(&mut self, now: Instant) -> Option<&Notification> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn visible(&mut self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    /// The last notification regardless of expiry.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
