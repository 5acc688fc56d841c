//! Email Custom Resource Definition

use crate::common::{AtProvider, Condition, DeletionPolicy, ProviderConfigReference};
use crate::references::AlertingProfileReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// EmailSpec defines the desired state of an email notification
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "notification.dynatrace.crossplane.io",
    version = "v1alpha1",
    kind = "Email",
    status = "EmailStatus",
    category = "crossplane",
    category = "managed",
    category = "dynatrace",
    printcolumn = r#"{"name":"READY","type":"string","jsonPath":".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name":"SYNCED","type":"string","jsonPath":".status.conditions[?(@.type=='Synced')].status"}"#,
    printcolumn = r#"{"name":"EXTERNAL-NAME","type":"string","jsonPath":".metadata.annotations.crossplane\\.io/external-name"}"#,
    printcolumn = r#"{"name":"AGE","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct EmailSpec {
    #[serde(default)]
    pub provider_config_ref: ProviderConfigReference,

    #[serde(default)]
    pub deletion_policy: DeletionPolicy,

    pub for_provider: EmailParameters,
}

/// Configurable fields of an email notification
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailParameters {
    #[serde(default)]
    pub enabled: bool,

    /// Name shown in Dynatrace
    pub display_name: String,

    pub to: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,

    pub subject: String,

    #[serde(default)]
    pub send_email_when_problem_is_closed: bool,

    pub body: String,

    #[serde(flatten)]
    pub alerting: AlertingProfileReference,
}

/// EmailStatus defines the observed state of an email notification
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub at_provider: AtProvider,
}

crate::managed::impl_managed!(Email, EmailStatus);
