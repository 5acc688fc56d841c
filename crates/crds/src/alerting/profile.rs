//! Profile Custom Resource Definition
//!
//! Declares a Dynatrace alerting profile (`builtin:alerting.profile`).

use crate::common::{AtProvider, Condition, DeletionPolicy, ProviderConfigReference};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ProfileSpec defines the desired state of an alerting profile
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "alerting.dynatrace.crossplane.io",
    version = "v1alpha1",
    kind = "Profile",
    status = "ProfileStatus",
    category = "crossplane",
    category = "managed",
    category = "dynatrace",
    printcolumn = r#"{"name":"READY","type":"string","jsonPath":".status.conditions[?(@.type=='Ready')].status"}"#,
    printcolumn = r#"{"name":"SYNCED","type":"string","jsonPath":".status.conditions[?(@.type=='Synced')].status"}"#,
    printcolumn = r#"{"name":"EXTERNAL-NAME","type":"string","jsonPath":".metadata.annotations.crossplane\\.io/external-name"}"#,
    printcolumn = r#"{"name":"AGE","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSpec {
    /// ProviderConfig holding the Dynatrace credentials
    #[serde(default)]
    pub provider_config_ref: ProviderConfigReference,

    #[serde(default)]
    pub deletion_policy: DeletionPolicy,

    pub for_provider: ProfileParameters,
}

/// Configurable fields of an alerting profile
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParameters {
    pub name: String,

    /// Management zone the profile is limited to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_zone: Option<String>,

    /// Severity rules, at most 100
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub severity_rules: Vec<SeverityRule>,

    /// Event filters, at most 100
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_filters: Vec<EventFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeverityRule {
    pub severity_level: SeverityLevel,

    /// Notify if a problem stays open longer than this (0-10000)
    pub delay_in_minutes: i32,

    pub tag_filter_include_mode: TagFilterIncludeMode,

    #[serde(rename = "tagFilter", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    Availability,
    CustomAlert,
    Errors,
    MonitoringUnavailable,
    Performance,
    ResourceContention,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagFilterIncludeMode {
    None,
    IncludeAny,
    IncludeAll,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(rename = "type")]
    pub filter_type: EventFilterType,

    /// Only valid when `type` is `PREDEFINED`
    #[serde(rename = "predefinedFilter", default, skip_serializing_if = "Option::is_none")]
    pub predefined: Option<PredefinedEventFilter>,

    /// Only valid when `type` is `CUSTOM`
    #[serde(rename = "customFilter", default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomEventFilter>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventFilterType {
    Predefined,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedEventFilter {
    pub event_type: EventType,
    #[serde(default)]
    pub negate: bool,
}

/// Dynatrace event types usable in predefined filters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum EventType {
    #[serde(rename = "EC2_HIGH_CPU")]
    AwsCpuSaturation,
    #[serde(rename = "OSI_HIGH_CPU")]
    CpuSaturation,
    #[serde(rename = "ELB_HIGH_BACKEND_ERROR_RATE")]
    ElbHighBackendErrorRate,
    #[serde(rename = "PROCESS_NA_HIGH_CONN_FAIL_RATE")]
    ConnectivityProblem,
    #[serde(rename = "CUSTOM_APP_CRASH_RATE_INCREASED")]
    CustomAppCrashRateIncrease,
    #[serde(rename = "CUSTOM_APPLICATION_ERROR_RATE_INCREASED")]
    CustomAppErrorRateIncrease,
    #[serde(rename = "CUSTOM_APPLICATION_SLOWDOWN")]
    CustomAppSlowdown,
    #[serde(rename = "CUSTOM_APPLICATION_UNEXPECTED_LOW_LOAD")]
    CustomAppUnexpectedLowLoad,
    #[serde(rename = "CUSTOM_APPLICATION_UNEXPECTED_HIGH_LOAD")]
    CustomAppUnexpectedHighLoad,
    #[serde(rename = "DCRUM_SVC_PERFORMANCE_DEGRADATION")]
    DataCenterServicePerformanceDegradation,
    #[serde(rename = "DCRUM_SVC_LOW_AVAILABILITY")]
    DataCenterServiceUnavailable,
    #[serde(rename = "ESXI_GUEST_CPU_LIMIT_REACHED")]
    EsxiGuestCpuSaturation,
    #[serde(rename = "ESXI_GUEST_ACTIVE_SWAP_WAIT")]
    EsxiGuestMemorySaturation,
    #[serde(rename = "ESXI_HOST_CPU_SATURATION")]
    EsxiHostCpuSaturation,
    #[serde(rename = "ESXI_HOST_MEMORY_SATURATION")]
    EsxiHostMemorySaturation,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventFilter {
    #[serde(rename = "titleFilter", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TextFilter>,

    #[serde(rename = "descriptionFilter", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextFilter>,

    /// Event property filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<MetadataFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextFilter {
    pub operator: TextOperator,
    pub value: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextOperator {
    BeginsWith,
    EndsWith,
    Contains,
    RegexMatches,
    StringEquals,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFilter {
    /// At most 20 items
    #[serde(default)]
    pub metadata_filter_items: Vec<MetadataFilterItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFilterItem {
    /// See `GET /api/v2/eventProperties` for available keys
    pub metadata_key: String,
    pub metadata_value: String,
}

/// ProfileStatus defines the observed state of an alerting profile
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub at_provider: AtProvider,
}

crate::managed::impl_managed!(Profile, ProfileStatus);
