//! `builtin:problem.notifications` value
//!
//! One schema covers every integration type; exactly one of the
//! type-specific blocks is set and it must agree with `type`.

use crate::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub enabled: bool,

    pub display_name: String,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    /// ID of the alerting profile that triggers this notification
    pub alerting_profile: String,

    #[serde(rename = "emailNotification", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailNotification>,

    #[serde(rename = "slackNotification", default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<SlackNotification>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

impl Settings for Notification {
    const SCHEMA_ID: &'static str = "builtin:problem.notifications";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Email,
    Slack,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotification {
    pub subject: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub cc_recipients: Vec<String>,
    #[serde(default)]
    pub bcc_recipients: Vec<String>,
    #[serde(default)]
    pub notify_closed_problems: bool,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SlackNotification {
    pub url: String,
    pub channel: String,
    pub message: String,
}
