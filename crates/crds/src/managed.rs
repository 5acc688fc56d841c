//! Accessors shared by every Dynatrace managed resource

use crate::common::{self, Condition, DeletionPolicy, ProviderConfigReference};
use kube::Resource;

/// Annotation holding the Dynatrace ID of the remote object
pub const EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";

/// Common view over the managed kinds (Profile, Email, Slack, AutoTag)
pub trait Managed: Resource {
    /// ProviderConfig holding the credentials for this object
    fn provider_config_ref(&self) -> &ProviderConfigReference;

    /// Whether deleting this object deletes the remote object
    fn deletion_policy(&self) -> DeletionPolicy;

    /// Status conditions, empty when there is no status yet
    fn conditions(&self) -> &[Condition];

    /// Status conditions, creating the status if needed
    fn conditions_mut(&mut self) -> &mut Vec<Condition>;

    /// `status.atProvider.id`
    fn observed_id(&self) -> Option<&str>;

    /// Set or clear `status.atProvider.id`
    fn set_observed_id(&mut self, id: Option<String>);

    /// Name of the referenced ProviderConfig
    fn provider_config_name(&self) -> &str {
        &self.provider_config_ref().name
    }

    /// Dynatrace ID recorded on the object, if it was ever created
    fn external_name(&self) -> Option<&str> {
        self.meta()
            .annotations
            .as_ref()
            .and_then(|a| a.get(EXTERNAL_NAME_ANNOTATION))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Record the Dynatrace ID in the external-name annotation
    fn set_external_name(&mut self, id: impl Into<String>) {
        self.meta_mut()
            .annotations
            .get_or_insert_with(Default::default)
            .insert(EXTERNAL_NAME_ANNOTATION.to_string(), id.into());
    }

    /// Set a condition, see [`common::set_condition`]
    fn set_condition(&mut self, condition: Condition) -> bool {
        common::set_condition(self.conditions_mut(), condition)
    }

    /// Merge patch body for the status subresource
    fn status_patch(&self) -> serde_json::Value {
        serde_json::json!({
            "status": {
                "conditions": self.conditions(),
                "atProvider": { "id": self.observed_id() },
            }
        })
    }

    /// Merge patch body persisting the external name annotation
    fn external_name_patch(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": {
                "annotations": { EXTERNAL_NAME_ANNOTATION: self.external_name() }
            }
        })
    }
}

macro_rules! impl_managed {
    ($kind:ty, $status:ty) => {
        impl $crate::managed::Managed for $kind {
            fn provider_config_ref(&self) -> &$crate::common::ProviderConfigReference {
                &self.spec.provider_config_ref
            }

            fn deletion_policy(&self) -> $crate::common::DeletionPolicy {
                self.spec.deletion_policy
            }

            fn conditions(&self) -> &[$crate::common::Condition] {
                self.status.as_ref().map(|s| s.conditions.as_slice()).unwrap_or_default()
            }

            fn conditions_mut(&mut self) -> &mut Vec<$crate::common::Condition> {
                &mut self.status.get_or_insert_with(<$status>::default).conditions
            }

            fn observed_id(&self) -> Option<&str> {
                self.status.as_ref().and_then(|s| s.at_provider.id.as_deref())
            }

            fn set_observed_id(&mut self, id: Option<String>) {
                self.status.get_or_insert_with(<$status>::default).at_provider.id = id;
            }
        }
    };
}

pub(crate) use impl_managed;
