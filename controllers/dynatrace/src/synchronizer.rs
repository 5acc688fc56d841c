//! External synchronizer
//!
//! Observe/Create/Update/Delete for one managed object against its remote
//! settings object. Holds no state between calls; retries and scheduling
//! belong to the reconcile loop.

use crate::diff::settings_diff;
use crate::error::ControllerError;
use crate::kinds::ManagedKind;
use crate::metrics;
use crds::{Condition, Managed};
use dynatrace_client::{DynatraceError, SettingsService};
use kube::ResourceExt;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of comparing a managed object with its remote counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// The remote object was found under the recorded external name
    pub resource_exists: bool,
    /// The remote object matches the desired state
    pub resource_up_to_date: bool,
    /// Drift description when the remote object differs
    pub diff: Option<String>,
}

impl Observation {
    /// No remote object, or none recorded yet
    pub fn not_exists() -> Self {
        Self { resource_exists: false, resource_up_to_date: false, diff: None }
    }

    /// Remote object exists and matches
    pub fn up_to_date() -> Self {
        Self { resource_exists: true, resource_up_to_date: true, diff: None }
    }

    /// Remote object exists but differs as described by `diff`
    pub fn drifted(diff: String) -> Self {
        Self { resource_exists: true, resource_up_to_date: false, diff: Some(diff) }
    }
}

/// Synchronizes objects of kind `K` through a settings service
pub struct Synchronizer<K: ManagedKind> {
    service: Arc<dyn SettingsService<K::Dto>>,
}

impl<K: ManagedKind> Synchronizer<K> {
    pub fn new(service: Arc<dyn SettingsService<K::Dto>>) -> Self {
        Self { service }
    }

    /// Determine whether the remote object exists and matches `obj`
    ///
    /// Without an external name nothing is read. A 404 means the object is
    /// gone; any other remote error is returned unchanged.
    pub async fn observe(&self, obj: &mut K) -> Result<Observation, ControllerError> {
        let Some(id) = obj.external_name().map(str::to_string) else {
            debug!("{} {} has no external name yet", K::KIND, obj.name_any());
            return Ok(Observation::not_exists());
        };

        let result = self.service.get(&id).await;
        metrics::record_external_operation(K::KIND, "get", result.is_ok() || is_not_found(&result));
        let remote = match result {
            Ok(remote) => remote,
            Err(e) if e.is_not_found() => {
                debug!("{} {} not found in Dynatrace ({})", K::KIND, obj.name_any(), id);
                obj.set_condition(Condition::unavailable());
                return Ok(Observation::not_exists());
            }
            Err(e) => return Err(e.into()),
        };

        obj.set_observed_id(Some(id));
        obj.set_condition(Condition::available());

        let diff = settings_diff(&remote, &obj.to_dto())?;
        if diff.is_empty() {
            Ok(Observation::up_to_date())
        } else {
            Ok(Observation::drifted(diff))
        }
    }

    /// Create the remote object and record its ID as the external name
    pub async fn create(&self, obj: &mut K) -> Result<(), ControllerError> {
        if let Some(id) = obj.external_name() {
            // A recorded ID may only be replaced after observe reported it gone
            debug!("{} {} replaces missing remote object {}", K::KIND, obj.name_any(), id);
        }

        obj.set_condition(Condition::creating());

        let result = self.service.create(&obj.to_dto()).await;
        metrics::record_external_operation(K::KIND, "create", result.is_ok());
        let stub = result?;

        info!("Created {} {} in Dynatrace: {}", K::KIND, obj.name_any(), stub.id);
        obj.set_external_name(stub.id.clone());
        obj.set_observed_id(Some(stub.id));
        Ok(())
    }

    /// Overwrite the remote object with the desired state
    pub async fn update(&self, obj: &K) -> Result<(), ControllerError> {
        let id = require_external_name(obj)?;

        let result = self.service.update(id, &obj.to_dto()).await;
        metrics::record_external_operation(K::KIND, "update", result.is_ok());
        result?;

        info!("Updated {} {} in Dynatrace: {}", K::KIND, obj.name_any(), id);
        Ok(())
    }

    /// Delete the remote object; an already missing object counts as deleted
    pub async fn delete(&self, obj: &mut K) -> Result<(), ControllerError> {
        let id = require_external_name(obj)?.to_string();

        let result = self.service.delete(&id).await;
        metrics::record_external_operation(K::KIND, "delete", result.is_ok() || is_not_found(&result));
        match result {
            Ok(()) => info!("Deleted {} {} from Dynatrace: {}", K::KIND, obj.name_any(), id),
            Err(e) if e.is_not_found() => {
                debug!("{} {} was already gone from Dynatrace: {}", K::KIND, obj.name_any(), id)
            }
            Err(e) => return Err(e.into()),
        }

        obj.set_condition(Condition::deleting());
        Ok(())
    }
}

fn require_external_name<K: ManagedKind>(obj: &K) -> Result<&str, ControllerError> {
    obj.external_name().ok_or_else(|| {
        ControllerError::InvalidResource(format!("{} {} has no external name", K::KIND, obj.name_any()))
    })
}

fn is_not_found<T>(result: &Result<T, DynatraceError>) -> bool {
    matches!(result, Err(e) if e.is_not_found())
}
