//! Notification CRDs (`notification.dynatrace.crossplane.io`)
//!
//! Both kinds map onto `builtin:problem.notifications` and are attached to
//! an alerting profile.

pub mod email;
pub mod slack;

pub use email::*;
pub use slack::*;
