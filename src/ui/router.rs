//! Route table and the navigation guard that keeps users on the setup page until
//! the company profile is complete.

use crate::core::ProfileGate;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Application routes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Client list
    Clients,
    /// Catalog item list
    Catalog,
    /// Company profile form
    Setup,
}

impl Route {
    /// Canonical path of the route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Clients => "/clients",
            Self::Catalog => "/catalog",
            Self::Setup => "/setup",
        }
    }

    /// Resolves a path. `/` and unknown paths land on the client list.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "/catalog" => Self::Catalog,
            "/setup" => Self::Setup,
            _ => Self::Clients,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Decision for one navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested route
    Proceed(Route),
    /// Go to this route instead
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up rendered
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Proceed(route) | Self::Redirect(route) => route,
        }
    }
}

/// Navigation guard backed by the profile completeness gate
pub struct RouteGuard {
    gate: Arc<ProfileGate>,
}

impl RouteGuard {
    /// Creates a guard that consults `gate` before every navigation.
    #[must_use]
    pub const fn new(gate: Arc<ProfileGate>) -> Self {
        Self { gate }
    }

    /// Runs before every navigation from `from` to `to_path`.
    ///
    /// Leaving the setup page always re-fetches the profile, since it was probably
    /// just edited. Every other navigation uses the cached answer.
    pub async fn before_each(&self, from: Option<Route>, to_path: &str) -> Navigation {
        let to = Route::from_path(to_path);
        if to.path() != to_path {
            debug!("Resolved {} to {}", to_path, to);
        }

        let complete = if from == Some(Route::Setup) && to != Route::Setup {
            self.gate.force_refresh().await.is_complete()
        } else {
            self.gate.check_cached().await
        };

        match (to, complete) {
            (Route::Setup, _) => Navigation::Proceed(Route::Setup),
            (_, false) => {
                info!("Company profile incomplete, redirecting {} to setup", to);
                Navigation::Redirect(Route::Setup)
            }
            (route, true) if route.path() == to_path => Navigation::Proceed(route),
            (route, true) => Navigation::Redirect(route),
        }
    }

    /// Forgets the cached completeness so the next user is checked afresh.
    pub async fn logout(&self) {
        self.gate.invalidate().await;
    }
}
