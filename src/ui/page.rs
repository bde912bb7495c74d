//! List page controller shared by the Clients and Catalog pages.
//!
//! The controller owns a [`PageState`] and runs the create, update, and archive flows
//! against an [`EntityApi`]. Rows only change after the service confirms a write: every
//! successful write is followed by a full re-fetch of the list.

use super::i18n::Messages;
use super::toast::{ToastQueue, ToastVariant};
use crate::api::EntityApi;
use crate::core::{EntityKind, FieldErrors, RawFields};
use crate::errors::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// What a list view renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState<K> {
    /// Rows as last returned by the service
    pub items: Vec<K>,
    /// A list fetch is in progress
    pub loading: bool,
    /// Why the last list fetch failed
    pub error: Option<String>,
    /// A create or update is in flight
    pub saving: bool,
    /// Per-field errors of the open form
    pub field_errors: FieldErrors,
    /// Why the last create, update, or archive failed
    pub action_error: Option<String>,
}

impl<K> Default for PageState<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            saving: false,
            field_errors: FieldErrors::default(),
            action_error: None,
        }
    }
}

/// Result of submitting a form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// The service stored the record
    Saved(T),
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The service rejected the write or could not be reached
    Failed(String),
    /// Another submit is still in flight; nothing was done
    Busy,
}

/// Single-flight flag for form submission
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    /// Claims the flag, or returns `None` if it is already held.
    pub(crate) fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the in-flight flag when dropped
pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Message shown for a failed call: the service's text, or the section's fallback.
pub(crate) fn failure_message(messages: &Messages, err: &Error, fallback_key: &str) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        messages.t(fallback_key, &[])
    } else {
        text
    }
}

/// Controller for one entity kind's list page
pub struct EntityPage<K: EntityKind> {
    api: Arc<dyn EntityApi<K>>,
    toasts: Arc<ToastQueue>,
    messages: Arc<Messages>,
    state: Mutex<PageState<K>>,
    in_flight: InFlight,
}

impl<K: EntityKind> EntityPage<K> {
    #[must_use]
    pub fn new(
        api: Arc<dyn EntityApi<K>>,
        toasts: Arc<ToastQueue>,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            api,
            toasts,
            messages,
            state: Mutex::new(PageState::default()),
            in_flight: InFlight::default(),
        }
    }

    /// Current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> PageState<K> {
        let mut state = self.lock().clone();
        state.saving = self.in_flight.is_active();
        state
    }

    /// Fetches the list and replaces the rows.
    ///
    /// On failure the rows are cleared and the message is kept in `error`.
    pub async fn load(&self) -> Result<()> {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.list().await {
            Ok(items) => {
                debug!("Loaded {} {} rows", items.len(), K::MESSAGES);
                self.update(|state| {
                    state.items = items;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let message = self.failure(&e, "errors.load");
                warn!("Failed to load {}: {}", K::MESSAGES, message);
                self.update(|state| {
                    state.items.clear();
                    state.error = Some(message);
                    state.loading = false;
                });
                Err(e)
            }
        }
    }

    /// Blank form for the create modal
    pub fn open_create(&self) -> RawFields {
        self.clear_form_errors();
        K::empty_form()
    }

    /// Form pre-filled from `entity` for the edit modal
    pub fn open_edit(&self, entity: &K) -> RawFields {
        self.clear_form_errors();
        entity.to_form()
    }

    /// Discards the open form's errors
    pub fn close_modal(&self) {
        self.clear_form_errors();
    }

    /// Validates `raw` and creates the entity.
    pub async fn submit_create(&self, raw: &RawFields) -> SubmitOutcome<K> {
        let Some(_guard) = self.in_flight.try_begin() else {
            debug!("Ignoring {} create while a save is in flight", K::MESSAGES);
            return SubmitOutcome::Busy;
        };
        let payload = match self.validate(raw) {
            Ok(payload) => payload,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.api.create(&payload).await {
            Ok(entity) => {
                info!("Created {} entry {}", K::MESSAGES, entity.id());
                self.confirm("toasts.created").await;
                SubmitOutcome::Saved(entity)
            }
            Err(e) => SubmitOutcome::Failed(self.record_action_error(&e, "errors.save")),
        }
    }

    /// Validates `raw` and replaces the fields of entity `id`.
    pub async fn submit_update(&self, id: &str, raw: &RawFields) -> SubmitOutcome<K> {
        let Some(_guard) = self.in_flight.try_begin() else {
            debug!("Ignoring {} update while a save is in flight", K::MESSAGES);
            return SubmitOutcome::Busy;
        };
        let payload = match self.validate(raw) {
            Ok(payload) => payload,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.api.update(id, &payload).await {
            Ok(entity) => {
                info!("Updated {} entry {}", K::MESSAGES, id);
                self.confirm("toasts.updated").await;
                SubmitOutcome::Saved(entity)
            }
            Err(e) => SubmitOutcome::Failed(self.record_action_error(&e, "errors.save")),
        }
    }

    /// Archives entity `id` and re-fetches the list.
    pub async fn archive(&self, id: &str) -> Result<()> {
        match self.api.archive(id).await {
            Ok(()) => {
                info!("Archived {} entry {}", K::MESSAGES, id);
                self.update(|state| state.action_error = None);
                self.confirm("toasts.archived").await;
                Ok(())
            }
            Err(e) => {
                self.record_action_error(&e, "errors.archive");
                Err(e)
            }
        }
    }

    fn validate(&self, raw: &RawFields) -> std::result::Result<K::Payload, FieldErrors> {
        match K::validate(raw) {
            Ok(payload) => {
                self.clear_form_errors();
                Ok(payload)
            }
            Err(errors) => {
                debug!("{} form rejected: {:?}", K::MESSAGES, errors);
                self.update(|state| state.field_errors = errors.clone());
                Err(errors)
            }
        }
    }

    /// Success toast, then a fresh list from the service.
    async fn confirm(&self, toast_key: &str) {
        let key = format!("{}.{toast_key}", K::MESSAGES);
        self.toasts
            .add_toast(self.messages.t(&key, &[]), ToastVariant::Success);
        // A failed refresh is already recorded in `error`.
        let _ = self.load().await;
    }

    fn record_action_error(&self, err: &Error, fallback: &str) -> String {
        let message = self.failure(err, fallback);
        warn!("{} write failed: {}", K::MESSAGES, message);
        self.update(|state| state.action_error = Some(message.clone()));
        message
    }

    fn failure(&self, err: &Error, fallback: &str) -> String {
        failure_message(&self.messages, err, &format!("{}.{fallback}", K::MESSAGES))
    }

    fn clear_form_errors(&self) {
        self.update(|state| {
            state.field_errors = FieldErrors::default();
            state.action_error = None;
        });
    }

    fn update(&self, change: impl FnOnce(&mut PageState<K>)) {
        change(&mut self.lock());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageState<K>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
