//! Dynatrace Settings 2.0 data models
//!
//! Envelope types of the `/api/v2/settings/objects` endpoints plus the value
//! schemas this provider manages.

pub mod alerting;
pub mod autotagging;
pub mod notifications;

use serde::{Deserialize, Serialize};

/// A settings object as returned by `GET /api/v2/settings/objects/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsObject {
    pub object_id: String,
    #[serde(default)]
    pub schema_id: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Item of the `POST /api/v2/settings/objects` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsObjectCreate {
    pub schema_id: String,
    pub scope: String,
    pub value: serde_json::Value,
}

/// Body of `PUT /api/v2/settings/objects/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsObjectUpdate {
    pub value: serde_json::Value,
}

/// Item of the `POST /api/v2/settings/objects` response
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsObjectResponse {
    pub code: u16,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// `{"error": {...}}` envelope of failed requests
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub constraint_violations: Vec<ConstraintViolation>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ErrorDetail {
    /// Message including the constraint violations, if any
    pub fn describe(&self) -> String {
        if self.constraint_violations.is_empty() {
            return self.message.clone();
        }
        let violations = self
            .constraint_violations
            .iter()
            .map(|v| match &v.path {
                Some(path) => format!("{}: {}", path, v.message),
                None => v.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!("{} ({})", self.message, violations)
    }
}

/// Reference to a freshly created remote object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    pub id: String,
}
