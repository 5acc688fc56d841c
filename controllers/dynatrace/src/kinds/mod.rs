//! Managed kinds and their desired-state mappers
//!
//! Each CRD kind names the Dynatrace value type it is stored as and maps its
//! `forProvider` parameters onto that value. Mappers are pure and total.

pub mod autotag;
pub mod email;
pub mod profile;
pub mod slack;

use crds::{AlertingProfileReference, Managed};
use dynatrace_client::Settings;
use kube::Resource;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A CRD kind synchronized with one Dynatrace settings schema
pub trait ManagedKind:
    Managed + Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Wire value the kind is stored as
    type Dto: Settings + Debug + PartialEq;

    /// Kind name used in logs and metrics
    const KIND: &'static str;

    /// Map the declared parameters onto the wire value
    fn to_dto(&self) -> Self::Dto;

    /// Alerting profile reference, for kinds attached to one
    fn alerting_profile_ref(&self) -> Option<&AlertingProfileReference> {
        None
    }

    /// Record the resolved alerting profile ID
    fn set_alerting_profile(&mut self, _id: String) {}
}

/// Serialized name of a unit enum variant (`ToLowerCase` -> `"To lower case"`)
pub(crate) fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => String::new(),
    }
}
