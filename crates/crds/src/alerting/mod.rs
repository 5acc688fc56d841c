//! Alerting CRDs (`alerting.dynatrace.crossplane.io`)

pub mod profile;

pub use profile::*;
