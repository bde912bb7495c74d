//! Company profile editor shown on the setup route.
//!
//! Saving the profile invalidates the completeness gate, so the next navigation
//! re-checks it instead of trusting a stale answer.

use super::i18n::Messages;
use super::page::{InFlight, SubmitOutcome, failure_message};
use super::toast::{ToastQueue, ToastVariant};
use crate::api::ProfileApi;
use crate::core::company_profile::{empty_profile, normalize_profile, validate_company_profile};
use crate::core::{FieldErrors, ProfileGate, RawFields};
use crate::entities::CompanyProfile;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// What the setup view renders besides the form itself
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Why the current profile could not be loaded
    pub error: Option<String>,
    /// A save is in flight
    pub saving: bool,
    /// Per-field errors of the last rejected submit
    pub field_errors: FieldErrors,
    /// Why the last save failed
    pub action_error: Option<String>,
}

/// Load and save flow for the company profile
pub struct ProfileEditor {
    api: Arc<dyn ProfileApi>,
    gate: Arc<ProfileGate>,
    toasts: Arc<ToastQueue>,
    messages: Arc<Messages>,
    state: Mutex<ProfileState>,
    in_flight: InFlight,
}

impl ProfileEditor {
    #[must_use]
    pub fn new(
        api: Arc<dyn ProfileApi>,
        gate: Arc<ProfileGate>,
        toasts: Arc<ToastQueue>,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            api,
            gate,
            toasts,
            messages,
            state: Mutex::new(ProfileState::default()),
            in_flight: InFlight::default(),
        }
    }

    /// Current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> ProfileState {
        let mut state = self.lock().clone();
        state.saving = self.in_flight.is_active();
        state
    }

    /// Fetches the current profile as a form with all twelve fields present.
    ///
    /// On failure the error is recorded and a blank form is returned.
    pub async fn load(&self) -> RawFields {
        match self.api.get_current().await {
            Ok(profile) => {
                self.update(|state| state.error = None);
                normalize_profile(Some(&profile))
            }
            Err(e) => {
                let message = failure_message(&self.messages, &e, "users.errors.load");
                warn!("Failed to load company profile: {}", message);
                self.update(|state| state.error = Some(message));
                empty_profile()
            }
        }
    }

    /// Validates and saves the profile, then invalidates the completeness gate.
    pub async fn submit(&self, raw: &RawFields) -> SubmitOutcome<CompanyProfile> {
        let Some(_guard) = self.in_flight.try_begin() else {
            debug!("Ignoring profile save while another is in flight");
            return SubmitOutcome::Busy;
        };

        let payload = match validate_company_profile(raw) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!("Profile form rejected: {:?}", errors);
                self.update(|state| state.field_errors = errors.clone());
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.update(|state| {
            state.field_errors = FieldErrors::default();
            state.action_error = None;
        });

        match self.api.update_current(&payload).await {
            Ok(profile) => {
                info!("Company profile updated");
                self.gate.invalidate().await;
                self.toasts.add_toast(
                    self.messages.t("users.toasts.updated", &[]),
                    ToastVariant::Success,
                );
                SubmitOutcome::Saved(profile)
            }
            Err(e) => {
                let message = failure_message(&self.messages, &e, "users.errors.save");
                warn!("Failed to save company profile: {}", message);
                self.update(|state| state.action_error = Some(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn update(&self, change: impl FnOnce(&mut ProfileState)) {
        change(&mut self.lock());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProfileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Completeness, FieldError};
    use crate::core::company_profile::PROFILE_FIELDS;
    use crate::test_utils::{FakeProfileApi, complete_profile};
    use std::time::Duration;

    fn build_editor(
        api: &Arc<FakeProfileApi>,
    ) -> (ProfileEditor, Arc<ProfileGate>, Arc<ToastQueue>) {
        let api = Arc::clone(api) as Arc<dyn ProfileApi>;
        let gate = Arc::new(ProfileGate::new(Arc::clone(&api), Duration::from_secs(5)));
        let toasts = Arc::new(ToastQueue::new(2800));
        let editor = ProfileEditor::new(
            api,
            Arc::clone(&gate),
            Arc::clone(&toasts),
            Arc::new(Messages::english()),
        );
        (editor, gate, toasts)
    }

    #[tokio::test]
    async fn test_load_fills_every_field() {
        let mut partial = complete_profile();
        partial.swift = None;
        let api = Arc::new(FakeProfileApi::with_profile(partial));
        let (editor, _, _) = build_editor(&api);

        let form = editor.load().await;

        assert_eq!(form.len(), PROFILE_FIELDS.len());
        assert_eq!(form["name"], "Acme Co");
        assert_eq!(form["swift"], "");
        assert_eq!(editor.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_load_failure_returns_blank_form() {
        let api = Arc::new(FakeProfileApi::failing("Network error"));
        let (editor, _, _) = build_editor(&api);

        let form = editor.load().await;

        assert_eq!(form, empty_profile());
        assert_eq!(editor.snapshot().error.as_deref(), Some("Network error"));
    }

    #[tokio::test]
    async fn test_submit_saves_and_invalidates_gate() {
        let api = Arc::new(FakeProfileApi::with_profile(CompanyProfile::default()));
        let (editor, gate, toasts) = build_editor(&api);
        assert!(!gate.check_cached().await);
        assert_eq!(gate.cached().await, Completeness::Incomplete);

        let outcome = editor
            .submit(&normalize_profile(Some(&complete_profile())))
            .await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Saved(ref p) if p.name.as_deref() == Some("Acme Co")
        ));
        assert_eq!(api.updates().len(), 1);
        assert_eq!(gate.cached().await, Completeness::Unknown);
        assert_eq!(toasts.messages(), vec!["Profile updated"]);
        assert!(gate.check_cached().await);
    }

    #[tokio::test]
    async fn test_submit_with_blank_field_is_rejected_locally() {
        let api = Arc::new(FakeProfileApi::with_profile(complete_profile()));
        let (editor, gate, _) = build_editor(&api);
        assert!(gate.check_cached().await);

        let mut form = normalize_profile(Some(&complete_profile()));
        form.insert("iban".to_string(), " ".to_string());
        let outcome = editor.submit(&form).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("iban"), Some(FieldError::Required));
        assert!(api.updates().is_empty());
        assert_eq!(gate.cached().await, Completeness::Complete);
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_gate() {
        let api = Arc::new(FakeProfileApi::with_profile(complete_profile()));
        let (editor, gate, toasts) = build_editor(&api);
        assert!(gate.check_cached().await);
        api.fail_updates_with("IČO is not valid");

        let outcome = editor
            .submit(&normalize_profile(Some(&complete_profile())))
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed("IČO is not valid".to_string()));
        assert_eq!(
            editor.snapshot().action_error.as_deref(),
            Some("IČO is not valid")
        );
        assert_eq!(gate.cached().await, Completeness::Complete);
        assert!(toasts.snapshot().is_empty());
    }
}
