//! Kubernetes resource watchers.
//!
//! One `kube_runtime::Controller` runs per managed kind. Every object carries
//! a finalizer so the remote object can be removed before the Kubernetes
//! object goes away.

use crate::backoff::BackoffRegistry;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::kinds::ManagedKind;
use crate::metrics;
use crate::reconciler::Reconciler;
use crds::{Condition, Managed};
use futures::StreamExt;
use kube::api::{Patch, PatchParams};
use kube::{Api, ResourceExt};
use kube_runtime::controller::{Action, Config as RuntimeConfig};
use kube_runtime::finalizer::{Event as FinalizerEvent, finalizer};
use kube_runtime::{Controller, watcher};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Finalizer guarding remote deletion
pub const FINALIZER: &str = "finalizer.managedresource.crossplane.io";

/// Attempts at recording a freshly created external name
const EXTERNAL_NAME_ATTEMPTS: u32 = 3;

const EXTERNAL_NAME_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Writes reconcile results back to the API server
#[async_trait::async_trait]
pub trait ObjectWriter: Send + Sync {
    /// Merge-patch the object itself
    async fn patch_object(&self, name: &str, patch: &Value) -> Result<(), ControllerError>;

    /// Merge-patch the status subresource
    async fn patch_status(&self, name: &str, patch: &Value) -> Result<(), ControllerError>;
}

/// `ObjectWriter` backed by the kind's `Api`
pub struct ApiWriter<K> {
    api: Api<K>,
}

impl<K> ApiWriter<K> {
    pub fn new(api: Api<K>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl<K: ManagedKind> ObjectWriter for ApiWriter<K> {
    async fn patch_object(&self, name: &str, patch: &Value) -> Result<(), ControllerError> {
        self.api.patch(name, &PatchParams::default(), &Patch::Merge(patch)).await?;
        Ok(())
    }

    async fn patch_status(&self, name: &str, patch: &Value) -> Result<(), ControllerError> {
        self.api.patch_status(name, &PatchParams::default(), &Patch::Merge(patch)).await?;
        Ok(())
    }
}

/// Shared state of one kind's controller
pub struct Context<K: ManagedKind> {
    pub api: Api<K>,
    pub writer: Arc<dyn ObjectWriter>,
    pub reconciler: Reconciler<K>,
    pub poll_interval: Duration,
    pub backoff: BackoffRegistry,
}

fn backoff_key<K: ManagedKind>(obj: &K) -> String {
    format!("{}/{}", K::KIND, obj.name_any())
}

async fn reconcile<K: ManagedKind>(obj: Arc<K>, ctx: Arc<Context<K>>) -> Result<Action, ControllerError> {
    let start = Instant::now();
    let key = backoff_key(obj.as_ref());
    let context = ctx.as_ref();

    let result = finalizer(&ctx.api, FINALIZER, obj, |event| async move {
        match event {
            FinalizerEvent::Apply(obj) => {
                apply(&context.reconciler, context.writer.as_ref(), context.poll_interval, obj).await
            }
            FinalizerEvent::Cleanup(obj) => cleanup(&context.reconciler, context.writer.as_ref(), obj).await,
        }
    })
    .await
    .map_err(|e| ControllerError::Finalizer(Box::new(e)));

    metrics::record_reconciliation(K::KIND, result.is_ok(), start.elapsed().as_secs_f64());
    if result.is_ok() {
        ctx.backoff.reset(&key);
    }
    result
}

/// Converge `obj` and persist the outcome
///
/// A new external name is written before the status. On failure only the
/// status (carrying the error) is written.
pub(crate) async fn apply<K: ManagedKind>(
    reconciler: &Reconciler<K>,
    writer: &dyn ObjectWriter,
    poll_interval: Duration,
    obj: Arc<K>,
) -> Result<Action, ControllerError> {
    let mut obj = (*obj).clone();
    let recorded = obj.external_name().map(str::to_string);

    match reconciler.apply(&mut obj).await {
        Ok(plan) => {
            if obj.external_name() != recorded.as_deref() {
                persist_external_name(writer, &obj).await?;
            }
            persist_status(writer, &obj).await?;
            debug!("{} {} reconciled ({:?})", K::KIND, obj.name_any(), plan);
            Ok(Action::requeue(poll_interval))
        }
        Err(e) => {
            obj.set_condition(Condition::reconcile_error(e.to_string()));
            if let Err(patch_err) = persist_status(writer, &obj).await {
                warn!("Failed to record error on {} {}: {}", K::KIND, obj.name_any(), patch_err);
            }
            Err(e)
        }
    }
}

/// Remove the remote counterpart of `obj`, then record the final status
pub(crate) async fn cleanup<K: ManagedKind>(
    reconciler: &Reconciler<K>,
    writer: &dyn ObjectWriter,
    obj: Arc<K>,
) -> Result<Action, ControllerError> {
    let mut obj = (*obj).clone();

    let result = reconciler.cleanup(&mut obj).await;
    if let Err(e) = &result {
        obj.set_condition(Condition::reconcile_error(e.to_string()));
    }
    if let Err(patch_err) = persist_status(writer, &obj).await {
        warn!("Failed to record status on deleted {} {}: {}", K::KIND, obj.name_any(), patch_err);
    }

    result.map(|_| Action::await_change())
}

/// Record the external name; losing it would orphan the remote object
async fn persist_external_name<K: ManagedKind>(writer: &dyn ObjectWriter, obj: &K) -> Result<(), ControllerError> {
    let name = obj.name_any();
    let patch = obj.external_name_patch();

    let mut attempt = 1;
    loop {
        match writer.patch_object(&name, &patch).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < EXTERNAL_NAME_ATTEMPTS => {
                warn!("Failed to record external name of {} {} (attempt {}): {}", K::KIND, name, attempt, e);
                attempt += 1;
                tokio::time::sleep(EXTERNAL_NAME_RETRY_DELAY * attempt).await;
            }
            Err(e) => {
                error!("Giving up recording external name of {} {}: {}", K::KIND, name, e);
                return Err(e);
            }
        }
    }
}

async fn persist_status<K: ManagedKind>(writer: &dyn ObjectWriter, obj: &K) -> Result<(), ControllerError> {
    writer.patch_status(&obj.name_any(), &obj.status_patch()).await
}

fn error_policy<K: ManagedKind>(obj: Arc<K>, error: &ControllerError, ctx: Arc<Context<K>>) -> Action {
    let delay = ctx.backoff.next(&backoff_key(obj.as_ref()));
    error!(
        "Reconciliation error for {} {}: {} (retrying in {}s)",
        K::KIND,
        obj.name_any(),
        error,
        delay.as_secs()
    );
    Action::requeue(delay)
}

/// Run the controller for kind `K` until a shutdown signal arrives
pub async fn watch_resource<K: ManagedKind>(
    api: Api<K>,
    ctx: Arc<Context<K>>,
    config: &ControllerConfig,
) -> Result<(), ControllerError> {
    info!("Starting {} watcher", K::KIND);

    let runtime_config = RuntimeConfig::default()
        .debounce(config.debounce)
        .concurrency(config.max_concurrent_reconciles);

    Controller::new(api, watcher::Config::default())
        .with_config(runtime_config)
        .shutdown_on_signal()
        .run(reconcile::<K>, error_policy::<K>, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj, _)) => debug!("Reconciled {} {}", K::KIND, obj.name),
                Err(e) => warn!("Controller error for {}: {}", K::KIND, e),
            }
        })
        .await;

    info!("{} watcher stopped", K::KIND);
    Ok(())
}
