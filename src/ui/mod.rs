//! Presentation layer - state containers and flows consumed by views.
//!
//! Nothing here renders. Views read snapshots (page state, toasts) and call the
//! controllers; the controllers talk to the service through the API traits.

/// Message table with `{token}` substitution
pub mod i18n;
/// Generic list page controller (Clients, Catalog)
pub mod page;
/// Company profile editor for the setup route
pub mod profile;
/// Routes and the profile completeness guard
pub mod router;
/// Toast notification queue
pub mod toast;
/// Throttled reporting of unhandled errors
pub mod unexpected;

use crate::api::{EntityApi, ProfileApi, RestClient};
use crate::config::Settings;
use crate::core::ProfileGate;
use crate::core::fields::RawFields;
use crate::entities::{CatalogItem, Client};
use crate::errors::Result;
use std::sync::Arc;
use tracing::info;

pub use i18n::Messages;
pub use page::{EntityPage, PageState, SubmitOutcome};
pub use profile::{ProfileEditor, ProfileState};
pub use router::{Navigation, Route, RouteGuard};
pub use toast::{Toast, ToastQueue, ToastVariant};
pub use unexpected::UnexpectedErrorReporter;

/// Shared state available to every view.
/// Holds the controllers and the collaborators they share, all wired to the same
/// toast queue, message table, and completeness gate.
pub struct AppContext {
    /// Message table shared by every controller
    pub messages: Arc<Messages>,
    pub toasts: Arc<ToastQueue>,
    /// Profile completeness cache behind the route guard
    pub gate: Arc<ProfileGate>,
    pub router: RouteGuard,
    /// Sink for failures no controller handled, e.g. panics
    pub reporter: Arc<UnexpectedErrorReporter>,
    pub clients: EntityPage<Client>,
    pub catalog: EntityPage<CatalogItem>,
    /// Setup page controller
    pub profile: ProfileEditor,
}

impl AppContext {
    /// Builds a context talking to the REST service configured in `settings`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let rest = Arc::new(RestClient::new(&settings.api)?);
        info!("Using invoicer API at {}", settings.api.base_url);
        Ok(Self::from_parts(
            settings,
            Arc::clone(&rest) as Arc<dyn EntityApi<Client>>,
            Arc::clone(&rest) as Arc<dyn EntityApi<CatalogItem>>,
            rest,
        ))
    }

    /// Builds a context over arbitrary API implementations.
    #[must_use]
    pub fn from_parts(
        settings: &Settings,
        clients_api: Arc<dyn EntityApi<Client>>,
        catalog_api: Arc<dyn EntityApi<CatalogItem>>,
        profile_api: Arc<dyn ProfileApi>,
    ) -> Self {
        let messages = Arc::new(Messages::english());
        let toasts = Arc::new(ToastQueue::new(settings.notifications.toast_duration_ms));
        let gate = Arc::new(ProfileGate::new(
            Arc::clone(&profile_api),
            settings.api.timeout(),
        ));

        Self {
            router: RouteGuard::new(Arc::clone(&gate)),
            reporter: Arc::new(UnexpectedErrorReporter::new(
                Arc::clone(&toasts),
                Arc::clone(&messages),
                settings.notifications.error_throttle_ms,
            )),
            clients: EntityPage::new(clients_api, Arc::clone(&toasts), Arc::clone(&messages)),
            catalog: EntityPage::new(catalog_api, Arc::clone(&toasts), Arc::clone(&messages)),
            profile: ProfileEditor::new(
                profile_api,
                Arc::clone(&gate),
                Arc::clone(&toasts),
                Arc::clone(&messages),
            ),
            messages,
            toasts,
            gate,
        }
    }

    /// Loads the page behind `route`.
    ///
    /// List load failures stay in the page state (`error`) for the view to render
    /// with a retry action; they are not unexpected. The setup route returns the
    /// profile form.
    pub async fn open(&self, route: Route) -> Option<RawFields> {
        match route {
            Route::Clients => {
                // Failure is recorded in the page state
                let _ = self.clients.load().await;
                None
            }
            Route::Catalog => {
                let _ = self.catalog.load().await;
                None
            }
            Route::Setup => Some(self.profile.load().await),
        }
    }
}
