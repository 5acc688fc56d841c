//! AutoTag Custom Resource Definition
//!
//! Declares a Dynatrace automatically applied tag (`builtin:tags.auto-tagging`).
//! Rules are evaluated by Dynatrace in the order given here.

use crate::common::{AtProvider, Condition, DeletionPolicy, ProviderConfigReference};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// AutoTagSpec defines the desired state of an auto-tag
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "tags.dynatrace.crossplane.io",
    version = "v1alpha1",
    kind = "AutoTag",
    status = "AutoTagStatus",
    category = "crossplane",
    category = "managed",
    category = "dynatrace",
    printcolumn = r#"{"name":"READY","type":"string","jsonPath":".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name":"SYNCED","type":"string","jsonPath":".status.conditions[?(@.type=='Synced')].status"}"#,
    printcolumn = r#"{"name":"EXTERNAL-NAME","type":"string","jsonPath":".metadata.annotations.crossplane\\.io/external-name"}"#,
    printcolumn = r#"{"name":"AGE","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AutoTagSpec {
    #[serde(default)]
    pub provider_config_ref: ProviderConfigReference,

    #[serde(default)]
    pub deletion_policy: DeletionPolicy,

    pub for_provider: AutoTagParameters,
}

/// Configurable fields of an auto-tag
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoTagParameters {
    /// Tag name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// A tagging rule
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub enabled: bool,

    /// Optional tag value, may contain placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "type")]
    pub rule_type: RuleType,

    pub tag_value_normalization: TagValueNormalization,

    /// Entity selector, used by `SELECTOR` rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_selector: Option<String>,

    /// Entity type the rule applies to, used by `ME` rules (e.g. `SERVICE`, `HOST`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_to_host_propagation: Option<bool>,

    #[serde(rename = "serviceToPGPropagation", default, skip_serializing_if = "Option::is_none")]
    pub service_to_pg_propagation: Option<bool>,

    /// Legacy spelling of `serviceToPGPropagation`, ignored when that is set
    #[serde(rename = "serviceToPgPropagation", default, skip_serializing_if = "Option::is_none")]
    pub service_to_pg_propagation_legacy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_to_pg_propagation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pg_to_host_propagation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pg_to_service_propagation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_to_pg_propagation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_to_service_propagation: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// Monitored entity attribute rule
    Me,
    /// Entity selector rule
    Selector,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TagValueNormalization {
    #[serde(rename = "Leave text as-is")]
    LeaveTextAsIs,
    #[serde(rename = "To lower case")]
    ToLowerCase,
    #[serde(rename = "To upper case")]
    ToUpperCase,
}

/// Attribute condition of an `ME` rule
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    /// Entity attribute to test (e.g. `SERVICE_NAME`)
    pub property: String,

    /// Comparison operator (e.g. `BEGINS_WITH`, `EQUALS`, `NOT_EXISTS`)
    pub operator: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_key_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// AutoTagStatus defines the observed state of an auto-tag
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoTagStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub at_provider: AtProvider,
}

crate::managed::impl_managed!(AutoTag, AutoTagStatus);
