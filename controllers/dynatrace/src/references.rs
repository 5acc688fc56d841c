//! Alerting profile reference resolution
//!
//! Email and Slack notifications need the Dynatrace ID of an alerting
//! profile. It is taken from `alertingProfile` when set, otherwise from the
//! external name of the `Profile` named by `alertingProfileRef`, otherwise from
//! the first `Profile` matching `alertingProfileSelector`.

use crate::error::ControllerError;
use crate::kinds::ManagedKind;
use crds::{Managed, Profile};
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use tracing::debug;

/// Read access to Profile objects
#[async_trait::async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Profile>, ControllerError>;
    async fn list(&self, label_selector: &str) -> Result<Vec<Profile>, ControllerError>;
}

/// Looks Profiles up in the cluster
#[derive(Clone)]
pub struct KubeProfileLookup {
    api: Api<Profile>,
}

impl KubeProfileLookup {
    pub fn new(client: Client) -> Self {
        Self { api: Api::all(client) }
    }
}

#[async_trait::async_trait]
impl ProfileLookup for KubeProfileLookup {
    async fn get(&self, name: &str) -> Result<Option<Profile>, ControllerError> {
        Ok(self.api.get_opt(name).await?)
    }

    async fn list(&self, label_selector: &str) -> Result<Vec<Profile>, ControllerError> {
        let list = self.api.list(&ListParams::default().labels(label_selector)).await?;
        Ok(list.items)
    }
}

/// Fill in the alerting profile ID of `obj` if it is given by reference
pub async fn resolve_alerting_profile<K: ManagedKind>(
    obj: &mut K,
    profiles: &dyn ProfileLookup,
) -> Result<(), ControllerError> {
    let Some(reference) = obj.alerting_profile_ref() else {
        return Ok(());
    };

    if reference.alerting_profile.as_deref().is_some_and(|id| !id.is_empty()) {
        return Ok(());
    }

    let id = if let Some(r) = &reference.alerting_profile_ref {
        let profile = profiles.get(&r.name).await?.ok_or_else(|| {
            ControllerError::ReferenceResolution(format!("referenced Profile {} not found", r.name))
        })?;
        profile.external_name().map(str::to_string).ok_or_else(|| {
            ControllerError::ReferenceResolution(format!("referenced Profile {} has not been created yet", r.name))
        })?
    } else if let Some(selector) = &reference.alerting_profile_selector {
        let label_selector = selector.to_label_selector();
        let mut candidates = profiles.list(&label_selector).await?;
        candidates.sort_by_key(|p| p.name_any());
        candidates
            .iter()
            .find_map(|p| p.external_name().map(str::to_string))
            .ok_or_else(|| {
                ControllerError::ReferenceResolution(format!(
                    "no created Profile matches selector {}",
                    label_selector
                ))
            })?
    } else {
        return Err(ControllerError::ReferenceResolution(
            "one of alertingProfile, alertingProfileRef or alertingProfileSelector is required".to_string(),
        ));
    };

    debug!("Resolved alerting profile of {} {} to {}", K::KIND, obj.name_any(), id);
    obj.set_alerting_profile(id);
    Ok(())
}
