//! Profile completeness gate.
//!
//! Route navigation asks "is the company profile filled in?" on every transition, so
//! the answer is cached. The cache holds one [`Completeness`] value and starts out
//! `Unknown`; it only changes through [`ProfileGate::check_cached`],
//! [`ProfileGate::force_refresh`], and [`ProfileGate::invalidate`]. There is no expiry
//! timer: callers invalidate after saving the profile and on logout.
//!
//! The cache lock is held across the fetch, so concurrent first checks wait for the
//! one fetch in progress instead of issuing their own.

use super::company_profile::is_profile_complete;
use crate::api::ProfileApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Tri-state result of a completeness check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completeness {
    /// All required profile fields are filled in
    Complete,
    /// At least one required field is blank
    Incomplete,
    /// Not checked yet, or the last fetch failed
    #[default]
    Unknown,
}

impl Completeness {
    /// Only a confirmed `Complete` lets navigation through.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    #[must_use]
    pub const fn from_bool(complete: bool) -> Self {
        if complete {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

/// Cached completeness check backed by the profile API
pub struct ProfileGate {
    api: Arc<dyn ProfileApi>,
    cached: Mutex<Completeness>,
    fetch_timeout: Duration,
}

impl ProfileGate {
    /// Creates a gate with an `Unknown` cache.
    #[must_use]
    pub fn new(api: Arc<dyn ProfileApi>, fetch_timeout: Duration) -> Self {
        Self {
            api,
            cached: Mutex::new(Completeness::Unknown),
            fetch_timeout,
        }
    }

    /// Returns the cached answer, fetching the profile only when the cache is `Unknown`.
    ///
    /// A failed fetch leaves the cache `Unknown` and reports `false`.
    pub async fn check_cached(&self) -> bool {
        let mut cached = self.cached.lock().await;
        if *cached != Completeness::Unknown {
            debug!("Profile completeness cache hit: {:?}", *cached);
            return cached.is_complete();
        }

        let fresh = self.fetch().await;
        *cached = fresh;
        fresh.is_complete()
    }

    /// Fetches the profile regardless of the cache and stores the fresh result.
    pub async fn force_refresh(&self) -> Completeness {
        let mut cached = self.cached.lock().await;
        let fresh = self.fetch().await;
        *cached = fresh;
        fresh
    }

    /// Forgets the cached answer so the next check fetches again.
    pub async fn invalidate(&self) {
        let mut cached = self.cached.lock().await;
        debug!("Invalidating profile completeness cache (was {:?})", *cached);
        *cached = Completeness::Unknown;
    }

    /// Current cached value, without fetching
    pub async fn cached(&self) -> Completeness {
        *self.cached.lock().await
    }

    async fn fetch(&self) -> Completeness {
        match tokio::time::timeout(self.fetch_timeout, self.api.get_current()).await {
            Ok(Ok(profile)) => {
                let result = Completeness::from_bool(is_profile_complete(&profile));
                info!("Profile completeness checked: {:?}", result);
                result
            }
            Ok(Err(e)) => {
                warn!("Profile fetch failed, completeness unknown: {}", e);
                Completeness::Unknown
            }
            Err(_) => {
                warn!(
                    "Profile fetch timed out after {:?}, completeness unknown",
                    self.fetch_timeout
                );
                Completeness::Unknown
            }
        }
    }
}
