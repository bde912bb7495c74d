//! `reqwest` implementation of the API traits.
//!
//! Every request carries a JSON content type and the configured timeout. A non-2xx
//! response is turned into [`Error::Api`] whose message is the body's `detail`
//! string, falling back to a generic message when the body has none. `204 No Content`
//! yields no body.

use super::{EntityApi, ProfileApi};
use crate::config::ApiSettings;
use crate::core::EntityKind;
use crate::entities::{CompanyProfile, CompanyProfilePayload};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Resource path of the signed-in company's profile
pub const PROFILE_RESOURCE: &str = "/api/users/me";

/// Message used when a failed response carries no usable `detail`
pub const REQUEST_FAILED: &str = "Request failed";

/// JSON-over-HTTP client for the invoicer REST service
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RestClient {
    /// Builds a client for `settings.base_url` with `settings.timeout_secs` applied to
    /// every request.
    ///
    /// # Errors
    /// Returns a configuration error if the underlying HTTP client cannot be built.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        Self::with_builder(settings, reqwest::Client::builder())
    }

    /// Like [`RestClient::new`], starting from a preconfigured `reqwest` builder.
    ///
    /// # Errors
    /// Returns a configuration error if the underlying HTTP client cannot be built.
    pub fn with_builder(settings: &ApiSettings, builder: ClientBuilder) -> Result<Self> {
        let timeout = settings.timeout();
        let http = builder
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Absolute URL for a resource path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends one request and returns the raw body, or `None` for `204 No Content`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<String>> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| self.send_error(e))?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await.map_err(|e| self.send_error(e))?;
        if !status.is_success() {
            let message = error_detail(&text);
            warn!("{} {} failed with {}: {}", method, url, status, message);
            return Err(Error::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(Some(text))
    }

    fn send_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            error.into()
        }
    }
}

/// Extracts the user-visible message from a failed response body.
#[must_use]
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| REQUEST_FAILED.to_string())
}

fn decode<T: DeserializeOwned>(body: Option<String>) -> Result<T> {
    let text = body.ok_or_else(|| Error::Transport {
        message: "Expected a response body, got none".to_string(),
    })?;
    serde_json::from_str(&text).map_err(Into::into)
}

fn item_path(resource: &str, id: &str) -> String {
    format!("{resource}/{id}")
}

#[async_trait]
impl<K: EntityKind> EntityApi<K> for RestClient {
    async fn list(&self) -> Result<Vec<K>> {
        decode(self.request(Method::GET, K::RESOURCE, None).await?)
    }

    async fn create(&self, payload: &K::Payload) -> Result<K> {
        let body = serde_json::to_value(payload)?;
        decode(self.request(Method::POST, K::RESOURCE, Some(body)).await?)
    }

    async fn update(&self, id: &str, payload: &K::Payload) -> Result<K> {
        let body = serde_json::to_value(payload)?;
        let path = item_path(K::RESOURCE, id);
        decode(self.request(Method::PUT, &path, Some(body)).await?)
    }

    async fn archive(&self, id: &str) -> Result<()> {
        let path = item_path(K::RESOURCE, id);
        self.request(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileApi for RestClient {
    async fn get_current(&self) -> Result<CompanyProfile> {
        decode(self.request(Method::GET, PROFILE_RESOURCE, None).await?)
    }

    async fn update_current(&self, payload: &CompanyProfilePayload) -> Result<CompanyProfile> {
        let body = serde_json::to_value(payload)?;
        decode(self.request(Method::PUT, PROFILE_RESOURCE, Some(body)).await?)
    }
}
