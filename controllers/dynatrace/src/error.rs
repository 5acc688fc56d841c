//! Controller-specific error types.
//!
//! Remote API failures are carried unchanged inside `Dynatrace` so the
//! status code stays visible to callers and in status conditions.

use dynatrace_client::DynatraceError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the Dynatrace Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Dynatrace API error
    #[error("Dynatrace error: {0}")]
    Dynatrace(#[from] DynatraceError),

    /// Credentials could not be resolved from the ProviderConfig
    #[error("Cannot resolve credentials: {0}")]
    Credentials(String),

    /// Alerting profile reference could not be resolved
    #[error("Cannot resolve reference: {0}")]
    ReferenceResolution(String),

    /// Object is missing data every managed resource must carry
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error while diffing or patching
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),

    /// Finalizer add/remove or the wrapped reconcile failed
    #[error("Finalizer error: {0}")]
    Finalizer(#[source] Box<kube_runtime::finalizer::Error<ControllerError>>),
}

impl ControllerError {
    /// Remote status code, when the failure came from Dynatrace
    pub fn remote_code(&self) -> Option<u16> {
        match self {
            ControllerError::Dynatrace(e) => e.code(),
            ControllerError::Finalizer(e) => match e.as_ref() {
                kube_runtime::finalizer::Error::ApplyFailed(inner)
                | kube_runtime::finalizer::Error::CleanupFailed(inner) => inner.remote_code(),
                _ => None,
            },
            _ => None,
        }
    }
}
