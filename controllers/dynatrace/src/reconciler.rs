//! Reconciliation logic for managed resources
//!
//! `apply` converges one object towards its declared state and `cleanup`
//! removes its remote counterpart. Both mutate the object in memory
//! (external name, conditions); persisting it is left to the caller.

use crate::credentials::{Connector, CredentialResolver};
use crate::error::ControllerError;
use crate::kinds::ManagedKind;
use crate::references::{ProfileLookup, resolve_alerting_profile};
use crate::synchronizer::{Observation, Synchronizer};
use crds::{Condition, DeletionPolicy, Managed};
use kube::ResourceExt;
use std::sync::Arc;
use tracing::{debug, info};

/// What a reconcile did to the remote object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// The remote object was missing and has been created
    Create,
    /// The remote object drifted and has been overwritten
    Update,
    /// The remote object already matched
    NoOp,
}

impl Plan {
    /// Step that converges the observed state
    pub fn for_observation(observation: &Observation) -> Self {
        if !observation.resource_exists {
            Plan::Create
        } else if !observation.resource_up_to_date {
            Plan::Update
        } else {
            Plan::NoOp
        }
    }
}

/// Reconciler for kind `K` with its collaborators injected
pub struct Reconciler<K: ManagedKind> {
    credentials: Arc<dyn CredentialResolver>,
    connector: Arc<dyn Connector<K::Dto>>,
    profiles: Arc<dyn ProfileLookup>,
}

impl<K: ManagedKind> Reconciler<K> {
    pub fn new(
        credentials: Arc<dyn CredentialResolver>,
        connector: Arc<dyn Connector<K::Dto>>,
        profiles: Arc<dyn ProfileLookup>,
    ) -> Self {
        Self { credentials, connector, profiles }
    }

    async fn synchronizer(&self, obj: &K) -> Result<Synchronizer<K>, ControllerError> {
        let creds = self.credentials.resolve(obj.provider_config_name()).await?;
        let service = self.connector.connect(&creds)?;
        Ok(Synchronizer::new(service))
    }

    /// Converge the remote object towards `obj`
    pub async fn apply(&self, obj: &mut K) -> Result<Plan, ControllerError> {
        info!("Reconciling {} {}", K::KIND, obj.name_any());

        resolve_alerting_profile(obj, self.profiles.as_ref()).await?;
        let sync = self.synchronizer(obj).await?;

        let observation = sync.observe(obj).await?;
        let plan = Plan::for_observation(&observation);
        match plan {
            Plan::Create => sync.create(obj).await?,
            Plan::Update => {
                if let Some(diff) = &observation.diff {
                    info!("{} {} drifted from Dynatrace:\n{}", K::KIND, obj.name_any(), diff);
                }
                sync.update(obj).await?;
            }
            Plan::NoOp => debug!("{} {} is up to date", K::KIND, obj.name_any()),
        }

        obj.set_condition(Condition::reconcile_success());
        Ok(plan)
    }

    /// Remove the remote object unless the deletion policy orphans it
    ///
    /// Returns whether a remote delete was issued.
    pub async fn cleanup(&self, obj: &mut K) -> Result<bool, ControllerError> {
        if obj.deletion_policy() == DeletionPolicy::Orphan {
            info!("Orphaning {} {} in Dynatrace", K::KIND, obj.name_any());
            return Ok(false);
        }

        // Never created, so there is nothing to delete
        if obj.external_name().is_none() {
            debug!("{} {} was never created in Dynatrace", K::KIND, obj.name_any());
            return Ok(false);
        }

        let sync = self.synchronizer(obj).await?;
        let observation = sync.observe(obj).await?;
        if !observation.resource_exists {
            debug!("{} {} has nothing to delete in Dynatrace", K::KIND, obj.name_any());
            return Ok(false);
        }

        sync.delete(obj).await?;
        Ok(true)
    }
}
