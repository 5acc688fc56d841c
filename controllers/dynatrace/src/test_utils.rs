//! Test utilities for unit testing reconcilers
//!
//! Builders for the managed kinds plus in-memory stand-ins for the
//! credential, connector and Profile lookup seams.

use crate::credentials::{Connector, CredentialResolver};
use crate::error::ControllerError;
use crate::references::ProfileLookup;
use crate::watcher::ObjectWriter;
use crds::*;
use dynatrace_client::{Credentials, MockSettingsService, Settings, SettingsService};
use kube::ResourceExt;
use std::collections::BTreeMap;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Helper to create a test Profile CRD
pub fn create_test_profile(name: &str, external_name: Option<&str>) -> Profile {
    let mut profile = Profile::new(
        name,
        ProfileSpec {
            provider_config_ref: ProviderConfigReference::default(),
            deletion_policy: DeletionPolicy::Delete,
            for_provider: ProfileParameters {
                name: name.to_string(),
                management_zone: None,
                severity_rules: vec![SeverityRule {
                    severity_level: SeverityLevel::Availability,
                    delay_in_minutes: 0,
                    tag_filter_include_mode: TagFilterIncludeMode::None,
                    tags: vec![],
                }],
                event_filters: vec![],
            },
        },
    );
    if let Some(id) = external_name {
        profile.set_external_name(id);
    }
    profile
}

/// Helper to create a test Email CRD
pub fn create_test_email(name: &str, alerting: AlertingProfileReference, external_name: Option<&str>) -> Email {
    let mut email = Email::new(
        name,
        EmailSpec {
            provider_config_ref: ProviderConfigReference::default(),
            deletion_policy: DeletionPolicy::Delete,
            for_provider: EmailParameters {
                enabled: true,
                display_name: name.to_string(),
                to: vec!["oncall@example.com".to_string()],
                cc: vec![],
                bcc: vec![],
                subject: "{State} Problem {ProblemID}: {ImpactedEntity}".to_string(),
                send_email_when_problem_is_closed: true,
                body: "{ProblemDetailsHTML}".to_string(),
                alerting,
            },
        },
    );
    if let Some(id) = external_name {
        email.set_external_name(id);
    }
    email
}

/// Helper to create a test Slack CRD
pub fn create_test_slack(name: &str, alerting: AlertingProfileReference, external_name: Option<&str>) -> Slack {
    let mut slack = Slack::new(
        name,
        SlackSpec {
            provider_config_ref: ProviderConfigReference::default(),
            deletion_policy: DeletionPolicy::Delete,
            for_provider: SlackParameters {
                name: name.to_string(),
                enabled: Some(true),
                enable: None,
                url: "https://hooks.slack.com/services/T000/B000/XXXX".to_string(),
                channel: "#alerts".to_string(),
                message: "{State} {ProblemTitle}".to_string(),
                alerting,
            },
        },
    );
    if let Some(id) = external_name {
        slack.set_external_name(id);
    }
    slack
}

/// Helper to create a test AutoTag CRD with one `ME` rule
pub fn create_test_autotag(name: &str, external_name: Option<&str>) -> AutoTag {
    let mut autotag = AutoTag::new(
        name,
        AutoTagSpec {
            provider_config_ref: ProviderConfigReference::default(),
            deletion_policy: DeletionPolicy::Delete,
            for_provider: AutoTagParameters {
                name: name.to_string(),
                description: None,
                rules: vec![Rule {
                    enabled: true,
                    value: Some("{Service:DetectedName}".to_string()),
                    rule_type: RuleType::Me,
                    tag_value_normalization: TagValueNormalization::LeaveTextAsIs,
                    entity_selector: None,
                    applies_to: Some("SERVICE".to_string()),
                    conditions: vec![],
                    service_to_host_propagation: None,
                    service_to_pg_propagation: Some(true),
                    service_to_pg_propagation_legacy: None,
                    host_to_pg_propagation: None,
                    pg_to_host_propagation: None,
                    pg_to_service_propagation: None,
                    azure_to_pg_propagation: None,
                    azure_to_service_propagation: None,
                }],
            },
        },
    );
    if let Some(id) = external_name {
        autotag.set_external_name(id);
    }
    autotag
}

/// Alerting profile given by its Dynatrace ID
pub fn direct_profile(id: &str) -> AlertingProfileReference {
    AlertingProfileReference {
        alerting_profile: Some(id.to_string()),
        ..Default::default()
    }
}

/// Alerting profile given by Profile name
pub fn profile_ref(name: &str) -> AlertingProfileReference {
    AlertingProfileReference {
        alerting_profile_ref: Some(Reference::new(name)),
        ..Default::default()
    }
}

/// Alerting profile given by label selector
pub fn profile_selector(labels: &[(&str, &str)]) -> AlertingProfileReference {
    AlertingProfileReference {
        alerting_profile_selector: Some(Selector {
            match_labels: labels.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }),
        ..Default::default()
    }
}

/// Credential resolver returning fixed credentials, or failing
pub struct StaticCredentials {
    credentials: Option<Credentials>,
}

impl StaticCredentials {
    pub fn ok() -> Self {
        Self {
            credentials: Some(Credentials::new("https://abc123.live.dynatrace.com", "dt0c01.test")),
        }
    }

    pub fn missing() -> Self {
        Self { credentials: None }
    }
}

#[async_trait::async_trait]
impl CredentialResolver for StaticCredentials {
    async fn resolve(&self, provider_config: &str) -> Result<Credentials, ControllerError> {
        self.credentials
            .clone()
            .ok_or_else(|| ControllerError::Credentials(format!("ProviderConfig {} not found", provider_config)))
    }
}

/// Connector handing out a shared mock service
pub struct MockConnector<V> {
    service: MockSettingsService<V>,
}

impl<V: Settings> MockConnector<V> {
    pub fn new(service: MockSettingsService<V>) -> Self {
        Self { service }
    }
}

impl<V: Settings> Connector<V> for MockConnector<V> {
    fn connect(&self, _credentials: &Credentials) -> Result<Arc<dyn SettingsService<V>>, ControllerError> {
        Ok(Arc::new(self.service.clone()))
    }
}

/// Profile lookup over a fixed set of Profiles
#[derive(Default)]
pub struct StaticProfiles {
    profiles: Vec<Profile>,
}

impl StaticProfiles {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }
}

#[async_trait::async_trait]
impl ProfileLookup for StaticProfiles {
    async fn get(&self, name: &str) -> Result<Option<Profile>, ControllerError> {
        Ok(self.profiles.iter().find(|p| p.name_any() == name).cloned())
    }

    async fn list(&self, label_selector: &str) -> Result<Vec<Profile>, ControllerError> {
        let wanted: BTreeMap<&str, &str> = label_selector
            .split(',')
            .filter_map(|pair| pair.split_once('='))
            .collect();
        Ok(self
            .profiles
            .iter()
            .filter(|p| {
                let labels = p.labels();
                wanted.iter().all(|(k, v)| labels.get(*k).map(String::as_str) == Some(*v))
            })
            .cloned()
            .collect())
    }
}

/// Add labels to a Profile
pub fn with_labels(mut profile: Profile, labels: &[(&str, &str)]) -> Profile {
    let map = profile.labels_mut();
    for (k, v) in labels {
        map.insert(k.to_string(), v.to_string());
    }
    profile
}

/// Target of a patch seen by `RecordingWriter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    Object,
    Status,
}

/// Object writer that records every patch attempt
#[derive(Default)]
pub struct RecordingWriter {
    patches: Mutex<Vec<(PatchTarget, Value)>>,
    object_failures: Mutex<usize>,
}

impl RecordingWriter {
    /// Reject the next `count` object patches
    pub fn failing_object_patches(count: usize) -> Self {
        Self {
            object_failures: Mutex::new(count),
            ..Default::default()
        }
    }

    pub fn patches(&self) -> Vec<(PatchTarget, Value)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<PatchTarget> {
        self.patches().into_iter().map(|(target, _)| target).collect()
    }

    /// Last status patch written
    pub fn last_status(&self) -> Option<Value> {
        self.patches()
            .into_iter()
            .rev()
            .find(|(target, _)| *target == PatchTarget::Status)
            .map(|(_, patch)| patch)
    }
}

#[async_trait::async_trait]
impl ObjectWriter for RecordingWriter {
    async fn patch_object(&self, _name: &str, patch: &Value) -> Result<(), ControllerError> {
        self.patches.lock().unwrap().push((PatchTarget::Object, patch.clone()));
        let mut failures = self.object_failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(ControllerError::Watch("object patch rejected".to_string()));
        }
        Ok(())
    }

    async fn patch_status(&self, _name: &str, patch: &Value) -> Result<(), ControllerError> {
        self.patches.lock().unwrap().push((PatchTarget::Status, patch.clone()));
        Ok(())
    }
}
