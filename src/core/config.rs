//! Logger configuration and its live shared handle
//!
//! `LoggerConfig` is validated once when the logger is constructed and then
//! held behind a `ConfigHandle`, so every log call reads the current values.
//! The three mutators (`set_location`, `set_locale`, `set_client_id`) are
//! deliberately unchecked: they overwrite without re-validation and become
//! visible to the next log call immediately.

use super::context::FieldValue;
use super::error::{LoggerError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the logger.
///
/// All string fields except `app_type` are required and must be non-empty;
/// construction of a [`Logger`](crate::Logger) fails otherwise.
/// `client_id` is nullable: `None` means "no active client identity".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Collection endpoint receiving event POSTs
    pub url: String,
    /// Basic auth credential sent with every delivery
    pub credential: String,
    /// Release identifier of the running application
    pub release: String,
    pub locale: String,
    pub location: String,
    pub environment: String,
    pub platform: String,
    /// Optional application type, forwarded as `app_type` in event context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    /// Optional client identity, forwarded as `client_id` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<FieldValue>,
}

impl LoggerConfig {
    /// Validate that every required field is present and non-empty.
    ///
    /// Returns the first missing field as a [`LoggerError::MissingField`].
    pub fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 7] = [
            ("url", &self.url),
            ("credential", &self.credential),
            ("release", &self.release),
            ("locale", &self.locale),
            ("location", &self.location),
            ("environment", &self.environment),
            ("platform", &self.platform),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(LoggerError::missing_field(name));
            }
        }
        Ok(())
    }
}

/// Shared, mutable view of a validated [`LoggerConfig`].
///
/// Cloning the handle is cheap; all clones observe the same live values.
/// Mutation is unchecked and assumes the host serializes concurrent writers
/// only at the semantic level; the lock keeps individual reads and writes
/// consistent.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<LoggerConfig>>,
}

impl ConfigHandle {
    /// Validate and wrap a config. Fails fast before any logging side effect.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
        })
    }

    /// Overwrite the location. No re-validation.
    pub fn set_location(&self, value: impl Into<String>) {
        self.inner.write().location = value.into();
    }

    /// Overwrite the locale. No re-validation.
    pub fn set_locale(&self, value: impl Into<String>) {
        self.inner.write().locale = value.into();
    }

    /// Overwrite or clear the client identity. No re-validation.
    pub fn set_client_id(&self, value: Option<FieldValue>) {
        self.inner.write().client_id = value;
    }

    /// Clone the current configuration values.
    pub fn snapshot(&self) -> LoggerConfig {
        self.inner.read().clone()
    }

    /// Read the current endpoint URL.
    pub fn url(&self) -> String {
        self.inner.read().url.clone()
    }

    /// Read the current credential.
    pub fn credential(&self) -> String {
        self.inner.read().credential.clone()
    }
}

/// Fixture shared by unit tests across the crate.
#[cfg(test)]
pub(crate) fn test_config() -> LoggerConfig {
    LoggerConfig {
        url: "https://log.example.com/".to_string(),
        credential: "dXNlcjpwYXNz".to_string(),
        release: "1.2.3".to_string(),
        locale: "en_HK".to_string(),
        location: "HK_HKG".to_string(),
        environment: "test".to_string(),
        platform: "webapp".to_string(),
        app_type: None,
        client_id: None,
    }
}
