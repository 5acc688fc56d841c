//! Settings schema binding
//!
//! Ties a value type to the Settings 2.0 schema it is stored under.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Scope every object managed by this provider is created in
pub const ENVIRONMENT_SCOPE: &str = "environment";

/// A Settings 2.0 value type
pub trait Settings: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Schema the value is stored under (e.g. `builtin:alerting.profile`)
    const SCHEMA_ID: &'static str;

    /// Scope new objects are created in
    const SCOPE: &'static str = ENVIRONMENT_SCOPE;

    /// Top-level JSON fields that never count as drift
    fn ignored_fields() -> &'static [&'static str] {
        &["legacyId"]
    }
}
