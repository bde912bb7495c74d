//! REST service access.
//!
//! Controllers talk to the service through the [`EntityApi`] and [`ProfileApi`]
//! traits so tests can substitute in-memory fakes. [`http::RestClient`] is the
//! `reqwest` implementation used by the application.

pub mod http;

use crate::core::EntityKind;
use crate::entities::{CompanyProfile, CompanyProfilePayload};
use crate::errors::Result;
use async_trait::async_trait;

pub use http::RestClient;

/// CRUD operations over one entity kind's REST collection
#[async_trait]
pub trait EntityApi<K: EntityKind>: Send + Sync {
    /// `GET <collection>`: every active entity
    async fn list(&self) -> Result<Vec<K>>;

    /// `POST <collection>`: creates an entity and returns the stored record
    async fn create(&self, payload: &K::Payload) -> Result<K>;

    /// `PUT <collection>/<id>`: replaces an entity's fields
    async fn update(&self, id: &str, payload: &K::Payload) -> Result<K>;

    /// `DELETE <collection>/<id>`: removes the entity from the active list
    async fn archive(&self, id: &str) -> Result<()>;
}

/// Access to the signed-in company's profile
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /api/users/me`
    async fn get_current(&self) -> Result<CompanyProfile>;

    /// `PUT /api/users/me`
    async fn update_current(&self, payload: &CompanyProfilePayload) -> Result<CompanyProfile>;
}
