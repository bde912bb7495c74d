//! Reporting of errors nobody handled.
//!
//! Every report is logged. The generic `common.unexpectedError` toast is shown at most
//! once per throttle window so a burst of failures does not flood the screen.

use super::i18n::Messages;
use super::toast::{ToastQueue, ToastVariant};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::error;

/// Throttled sink for errors no controller handled
pub struct UnexpectedErrorReporter {
    toasts: Arc<ToastQueue>,
    messages: Arc<Messages>,
    window: TimeDelta,
    last_shown: Mutex<Option<DateTime<Utc>>>,
}

impl UnexpectedErrorReporter {
    /// Creates a reporter that shows at most one toast per `throttle_ms`.
    #[must_use]
    pub fn new(toasts: Arc<ToastQueue>, messages: Arc<Messages>, throttle_ms: u64) -> Self {
        let millis = i64::try_from(throttle_ms).unwrap_or(i64::MAX);
        Self {
            toasts,
            messages,
            window: TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX),
            last_shown: Mutex::new(None),
        }
    }

    /// Logs `err` and shows the generic toast unless one was shown within the window.
    /// Returns whether a toast was shown.
    pub fn report(&self, err: &dyn Display) -> bool {
        self.report_at(err, Utc::now())
    }

    /// [`UnexpectedErrorReporter::report`] with an explicit clock reading.
    pub fn report_at(&self, err: &dyn Display, now: DateTime<Utc>) -> bool {
        error!("Unexpected error: {}", err);

        let mut last_shown = self
            .last_shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if last_shown.is_some_and(|last| now.signed_duration_since(last) < self.window) {
            return false;
        }

        *last_shown = Some(now);
        self.toasts.add_toast_at(
            self.messages.t("common.unexpectedError", &[]),
            ToastVariant::Error,
            now,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn reporter(throttle_ms: u64) -> (UnexpectedErrorReporter, Arc<ToastQueue>) {
        let toasts = Arc::new(ToastQueue::new(60_000));
        let reporter = UnexpectedErrorReporter::new(
            Arc::clone(&toasts),
            Arc::new(Messages::english()),
            throttle_ms,
        );
        (reporter, toasts)
    }

    #[test]
    fn test_one_toast_per_window() {
        let (reporter, toasts) = reporter(2000);
        let start = Utc::now();
        let err = Error::Transport {
            message: "connection reset".to_string(),
        };

        assert!(reporter.report_at(&err, start));
        assert!(!reporter.report_at(&err, start + TimeDelta::milliseconds(500)));
        assert!(!reporter.report_at(&err, start + TimeDelta::milliseconds(1999)));
        assert_eq!(
            toasts.messages(),
            vec!["Something went wrong. Please try again."]
        );

        assert!(reporter.report_at(&err, start + TimeDelta::milliseconds(2000)));
        assert_eq!(toasts.snapshot().len(), 2);
        assert!(
            toasts
                .snapshot()
                .iter()
                .all(|toast| toast.variant == ToastVariant::Error)
        );
    }

    #[test]
    fn test_zero_window_never_throttles() {
        let (reporter, toasts) = reporter(0);
        let now = Utc::now();
        assert!(reporter.report_at(&"first", now));
        assert!(reporter.report_at(&"second", now));
        assert_eq!(toasts.snapshot().len(), 2);
    }
}
