//! Slack Custom Resource Definition

use crate::common::{AtProvider, Condition, DeletionPolicy, ProviderConfigReference};
use crate::references::AlertingProfileReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SlackSpec defines the desired state of a Slack notification
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "notification.dynatrace.crossplane.io",
    version = "v1alpha1",
    kind = "Slack",
    status = "SlackStatus",
    category = "crossplane",
    category = "managed",
    category = "dynatrace",
    printcolumn = r#"{"name":"READY","type":"string","jsonPath":".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name":"SYNCED","type":"string","jsonPath":".status.conditions[?(@.type=='Synced')].status"}"#,
    printcolumn = r#"{"name":"EXTERNAL-NAME","type":"string","jsonPath":".metadata.annotations.crossplane\\.io/external-name"}"#,
    printcolumn = r#"{"name":"AGE","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct SlackSpec {
    #[serde(default)]
    pub provider_config_ref: ProviderConfigReference,

    #[serde(default)]
    pub deletion_policy: DeletionPolicy,

    pub for_provider: SlackParameters,
}

/// Configurable fields of a Slack notification
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlackParameters {
    /// Name of the notification in Dynatrace
    pub name: String,

    /// Whether the notification is active; active when neither spelling is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Legacy spelling of `enabled`, ignored when `enabled` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Slack webhook URL
    pub url: String,

    /// Channel the notification is posted to
    pub channel: String,

    /// Message content
    pub message: String,

    #[serde(flatten)]
    pub alerting: AlertingProfileReference,
}

/// SlackStatus defines the observed state of a Slack notification
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SlackStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub at_provider: AtProvider,
}

crate::managed::impl_managed!(Slack, SlackStatus);
