//! `builtin:alerting.profile` value

use crate::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_zone: Option<String>,

    #[serde(default)]
    pub severity_rules: Vec<SeverityRule>,

    #[serde(default)]
    pub event_filters: Vec<EventFilter>,

    /// Numeric ID from the config API, not part of the desired state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl Settings for Profile {
    const SCHEMA_ID: &'static str = "builtin:alerting.profile";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeverityRule {
    pub severity_level: String,
    pub delay_in_minutes: i32,
    pub tag_filter_include_mode: String,
    #[serde(default)]
    pub tag_filter: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(rename = "type")]
    pub filter_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_filter: Option<PredefinedEventFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_filter: Option<CustomEventFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedEventFilter {
    pub event_type: String,
    #[serde(default)]
    pub negate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_filter: Option<TextFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_filter: Option<TextFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<MetadataFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextFilter {
    pub operator: String,
    pub value: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFilter {
    #[serde(default)]
    pub metadata_filter_items: Vec<MetadataFilterItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFilterItem {
    pub metadata_key: String,
    pub metadata_value: String,
}
