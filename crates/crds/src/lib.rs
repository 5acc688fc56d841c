//! Dynatrace Provider CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the Dynatrace managed resources
//! and the shared Crossplane-style status model they carry.

pub mod common;
pub mod managed;
pub mod references;
pub mod provider_config;

pub mod alerting;
pub mod notification;
pub mod tags;

#[cfg(test)]
mod test_schema;

pub use common::*;
pub use managed::*;
pub use references::*;
pub use provider_config::*;

pub use alerting::*;
pub use notification::*;
pub use tags::*;
