//! Toast notifications - short-lived messages shown after user actions.
//!
//! The queue is a plain state container: views render [`ToastQueue::snapshot`] and
//! call [`ToastQueue::prune_expired`] on their own tick.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Visual style of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    /// Confirms a completed action
    Success,
    /// Reports a failure
    Error,
    /// Neutral notice
    Info,
}

/// One visible notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Handle for [`ToastQueue::remove_toast`]
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
    /// When the toast should disappear
    pub expires_at: DateTime<Utc>,
}

/// Ordered list of visible toasts
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    duration: TimeDelta,
}

impl ToastQueue {
    /// Creates an empty queue whose toasts stay visible for `duration_ms`.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        let millis = i64::try_from(duration_ms).unwrap_or(i64::MAX);
        Self {
            toasts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            duration: TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Shows `message` and returns the new toast's id.
    pub fn add_toast(&self, message: impl Into<String>, variant: ToastVariant) -> u64 {
        self.add_toast_at(message, variant, Utc::now())
    }

    /// [`ToastQueue::add_toast`] with an explicit clock reading.
    pub fn add_toast_at(
        &self,
        message: impl Into<String>,
        variant: ToastVariant,
        now: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            variant,
            expires_at: now.checked_add_signed(self.duration).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        debug!("Toast {} ({:?}): {}", id, variant, toast.message);
        self.lock().push(toast);
        id
    }

    /// Dismisses a toast early. Unknown ids are ignored.
    pub fn remove_toast(&self, id: u64) {
        self.lock().retain(|toast| toast.id != id);
    }

    /// Drops every toast whose display time is over.
    pub fn prune_expired(&self, now: DateTime<Utc>) {
        self.lock().retain(|toast| toast.expires_at > now);
    }

    /// Visible toasts, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Messages of the visible toasts, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|toast| toast.message.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
