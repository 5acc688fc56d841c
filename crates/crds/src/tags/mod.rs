//! Tagging CRDs (`tags.dynatrace.crossplane.io`)

pub mod autotag;

pub use autotag::*;
