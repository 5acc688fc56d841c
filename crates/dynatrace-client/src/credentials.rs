//! Dynatrace environment credentials
//!
//! Credentials are stored as JSON, `{"url": "https://abc123.live.dynatrace.com", "token": "dt0c01..."}`,
//! in a Secret key or an environment variable.

use crate::error::DynatraceError;
use serde::Deserialize;
use std::fmt;

/// Environment URL and API token pair
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}

impl Credentials {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self { url: url.into(), token: token.into() }
    }

    /// Decode credentials from their JSON form
    pub fn from_json(bytes: &[u8]) -> Result<Self, DynatraceError> {
        let creds: Credentials = serde_json::from_slice(bytes)
            .map_err(|e| DynatraceError::Credentials(format!("cannot unmarshal credentials: {}", e)))?;

        if creds.url.trim().is_empty() {
            return Err(DynatraceError::Credentials("url is empty".to_string()));
        }
        if creds.token.trim().is_empty() {
            return Err(DynatraceError::Credentials("token is empty".to_string()));
        }

        Ok(creds)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}
