//! Cross-resource references
//!
//! Notification integrations point at an alerting profile. The profile can be
//! given directly by its Dynatrace ID, by the name of a `Profile` object, or
//! by a label selector matching `Profile` objects.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to another managed resource by name
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the referenced resource
    pub name: String,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Selects a managed resource by labels
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    /// Labels the referenced resource must carry
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

impl Selector {
    /// Render as a Kubernetes label selector string (`k1=v1,k2=v2`)
    pub fn to_label_selector(&self) -> String {
        self.match_labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The three ways a notification names its alerting profile
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertingProfileReference {
    /// Dynatrace ID of the alerting profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting_profile: Option<String>,

    /// Reference to a Profile whose ID is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting_profile_ref: Option<Reference>,

    /// Selects a Profile whose ID is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting_profile_selector: Option<Selector>,
}
