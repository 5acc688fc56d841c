//! Dynatrace Controller
//!
//! Keeps Dynatrace configuration in sync with Kubernetes objects:
//! - Profile: alerting profiles (`builtin:alerting.profile`)
//! - Email, Slack: problem notifications (`builtin:problem.notifications`)
//! - AutoTag: automatically applied tags (`builtin:tags.auto-tagging`)
//!
//! Credentials come from the ProviderConfig each object references.

mod backoff;
mod config;
mod controller;
mod credentials;
mod diff;
mod error;
mod kinds;
mod metrics;
mod reconciler;
mod references;
mod server;
mod synchronizer;
mod watcher;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod watcher_test;

use crate::config::{ControllerConfig, LogFormat};
use controller::Controller;
use server::ServerState;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ControllerConfig::from_env()?;
    init_tracing(config.log_format);

    info!("Starting Dynatrace Controller");
    info!("Configuration:");
    info!("  Poll interval: {}s", config.poll_interval.as_secs());
    info!("  Max concurrent reconciles: {}", config.max_concurrent_reconciles);
    info!("  Debounce: {}s", config.debounce.as_secs());
    info!("  Metrics port: {}", config.metrics_port);

    // kube and reqwest both pull in rustls; pin the process-wide provider
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        info!("rustls crypto provider already installed");
    }

    metrics::register_metrics()?;

    let state = Arc::new(ServerState::default());
    let server_state = state.clone();
    let port = config.metrics_port;
    tokio::spawn(async move {
        if let Err(e) = server::start_server(port, server_state).await {
            error!("HTTP server failed: {}", e);
        }
    });

    let controller = Controller::new(&config).await?;
    state.set_ready(true);
    controller.run().await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
