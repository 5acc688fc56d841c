//! Dynatrace Settings 2.0 API client
//!
//! Thin wrapper over `/api/v2/settings/objects`. Values are passed as raw
//! JSON; typed access lives in [`crate::service`].

use crate::credentials::Credentials;
use crate::error::DynatraceError;
use crate::models::*;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

const OBJECTS_PATH: &str = "/api/v2/settings/objects";

/// Dynatrace Settings API client
#[derive(Clone)]
pub struct SettingsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for SettingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl SettingsClient {
    /// Create a new client for the environment named in `credentials`
    pub fn new(credentials: &Credentials) -> Result<Self, DynatraceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DynatraceError::Http)?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            token: credentials.token.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn object_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, OBJECTS_PATH, id)
    }

    fn auth_header(&self) -> String {
        format!("Api-Token {}", self.token)
    }

    /// Fetch a settings object by ID
    pub async fn get_object(&self, id: &str) -> Result<SettingsObject, DynatraceError> {
        debug!("Fetching settings object {}", id);

        let response = self
            .client
            .get(self.object_url(id))
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check(response).await?;
        let text = response.text().await?;
        let object: SettingsObject = serde_json::from_str(&text)?;
        Ok(object)
    }

    /// Create a single settings object and return its ID
    pub async fn create_object(&self, object: &SettingsObjectCreate) -> Result<String, DynatraceError> {
        let url = format!("{}{}", self.base_url, OBJECTS_PATH);
        debug!("Creating settings object of schema {}", object.schema_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .json(&[object])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Validation failures come back as a per-item array, not the usual envelope
        let items = match serde_json::from_str::<Vec<SettingsObjectResponse>>(&text) {
            Ok(items) if items.is_empty() && !status.is_success() => return Err(api_error(status, "")),
            Ok(items) => items,
            Err(_) if !status.is_success() => return Err(api_error(status, &text)),
            Err(e) => return Err(DynatraceError::Serialization(e)),
        };

        let item = items
            .into_iter()
            .next()
            .ok_or_else(|| DynatraceError::InvalidResponse("create returned no items".to_string()))?;

        if !(200..300).contains(&item.code) {
            let message = item.error.map(|e| e.describe()).unwrap_or_else(|| text.clone());
            return Err(DynatraceError::Api { code: item.code, message });
        }

        item.object_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DynatraceError::InvalidResponse("create returned no objectId".to_string()))
    }

    /// Replace the value of an existing settings object
    pub async fn update_object(&self, id: &str, value: serde_json::Value) -> Result<(), DynatraceError> {
        debug!("Updating settings object {}", id);

        let response = self
            .client
            .put(self.object_url(id))
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .json(&SettingsObjectUpdate { value })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Delete a settings object
    pub async fn delete_object(&self, id: &str) -> Result<(), DynatraceError> {
        debug!("Deleting settings object {}", id);

        let response = self
            .client
            .delete(self.object_url(id))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into an API error
async fn check(response: Response) -> Result<Response, DynatraceError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &str) -> DynatraceError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.describe(),
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("unknown error").to_string(),
        Err(_) => body.chars().take(500).collect(),
    };
    DynatraceError::Api { code: status.as_u16(), message }
}
