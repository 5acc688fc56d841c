//! `builtin:tags.auto-tagging` value

use crate::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoTag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Settings for AutoTag {
    const SCHEMA_ID: &'static str = "builtin:tags.auto-tagging";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub enabled: bool,

    /// `ME` or `SELECTOR`
    #[serde(rename = "type")]
    pub rule_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,

    pub value_normalization: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_selector: Option<String>,

    /// Only present on `ME` rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_rule: Option<AttributeRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(default)]
    pub conditions: Vec<AttributeCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_to_host_propagation: Option<bool>,

    #[serde(rename = "serviceToPGPropagation", default, skip_serializing_if = "Option::is_none")]
    pub service_to_pg_propagation: Option<bool>,

    #[serde(rename = "hostToPGPropagation", default, skip_serializing_if = "Option::is_none")]
    pub host_to_pg_propagation: Option<bool>,

    #[serde(rename = "pgToHostPropagation", default, skip_serializing_if = "Option::is_none")]
    pub pg_to_host_propagation: Option<bool>,

    #[serde(rename = "pgToServicePropagation", default, skip_serializing_if = "Option::is_none")]
    pub pg_to_service_propagation: Option<bool>,

    #[serde(rename = "azureToPGPropagation", default, skip_serializing_if = "Option::is_none")]
    pub azure_to_pg_propagation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_to_service_propagation: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttributeCondition {
    /// Entity attribute the condition tests
    pub key: String,

    pub operator: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_key_source: Option<String>,

    #[serde(rename = "entityId", default, skip_serializing_if = "Option::is_none")]
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
