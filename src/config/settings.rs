//! Application settings loading from invoicer.toml
//!
//! Settings come from an optional TOML file with defaults for every key, then
//! environment variables (usually populated from `.env`) override the API section.
//! A missing file is not an error: the defaults point at a local development server.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "invoicer.toml";

/// Environment variable overriding [`ApiSettings::base_url`]
pub const API_BASE_URL_VAR: &str = "INVOICER_API_BASE_URL";

/// Environment variable overriding [`ApiSettings::timeout_secs`]
pub const API_TIMEOUT_VAR: &str = "INVOICER_API_TIMEOUT_SECS";

/// Full settings structure representing the invoicer.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// REST service location and limits
    pub api: ApiSettings,
    /// Toast and error notification behavior
    pub notifications: NotificationSettings,
}

/// Connection settings for the REST service
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL without a trailing `/api` segment
    pub base_url: String,
    /// Per-request timeout, also applied to profile-gate fetches
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiSettings {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Notification timings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationSettings {
    /// How long a toast stays visible
    pub toast_duration_ms: u64,
    /// Minimum gap between two unexpected-error notifications
    pub error_throttle_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            toast_duration_ms: 2800,
            error_throttle_ms: 2000,
        }
    }
}

/// Parses settings from TOML text. Missing keys take their defaults.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value has the wrong type.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults when the file does
/// not exist. Environment overrides are applied afterwards.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - An override variable holds an unparseable value
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load settings from: {:?}", path_ref);

    let mut settings = match std::fs::read_to_string(path_ref) {
        Ok(contents) => parse_settings(&contents)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file at {:?}, using defaults", path_ref);
            Settings::default()
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read settings file {path_ref:?}: {e}"),
            });
        }
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
    Ok(settings)
}

/// Loads settings from the default location (./invoicer.toml)
///
/// # Errors
/// See [`load_settings`].
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_PATH)
}

/// Applies environment overrides using `lookup` to read variables.
///
/// # Errors
/// Returns an error if the timeout override is not a whole number of seconds.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(API_BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
        settings.api.base_url = base_url.trim().to_string();
    }

    if let Some(raw) = lookup(API_TIMEOUT_VAR) {
        settings.api.timeout_secs = raw.trim().parse().map_err(|_| Error::Config {
            message: format!("{API_TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"),
        })?;
    }

    Ok(())
}
