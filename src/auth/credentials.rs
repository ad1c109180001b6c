//! API key management for Hypixel API authentication.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::HypixelError;

/// Default environment variable holding the API key.
pub const API_KEY_ENV: &str = "HYPIXEL_API_KEY";

/// A Hypixel API key.
///
/// The key is only transmitted in the `API-Key` header of authenticated
/// requests and is redacted from `Debug` output.
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create an API key, rejecting empty or blank values.
    pub fn new(key: impl Into<String>) -> Result<Self, HypixelError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(HypixelError::Config("API key must be a non-empty string".into()));
        }
        Ok(Self {
            key: SecretString::from(key),
        })
    }

    /// Read the key from `HYPIXEL_API_KEY`.
    pub fn from_env() -> Result<Self, HypixelError> {
        Self::from_env_var(API_KEY_ENV)
    }

    /// Read the key from a custom environment variable.
    pub fn from_env_var(var: &str) -> Result<Self, HypixelError> {
        let key = std::env::var(var)
            .map_err(|_| HypixelError::Config(format!("Environment variable {var} not set")))?;
        Self::new(key)
    }

    /// Get the raw key.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.key.expose_secret()
    }

    /// Build the sensitive `API-Key` header value.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, HypixelError> {
        let mut value = HeaderValue::from_str(self.expose_secret())
            .map_err(|_| HypixelError::Config("API key is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey").field("key", &"[REDACTED]").finish()
    }
}

impl TryFrom<&str> for ApiKey {
    type Error = HypixelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ApiKey {
    type Error = HypixelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
