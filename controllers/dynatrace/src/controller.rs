//! Main controller implementation.
//!
//! Builds one watcher per managed kind (Profile, Email, Slack, AutoTag) and
//! runs them until shutdown.

use crate::backoff::BackoffRegistry;
use crate::config::ControllerConfig;
use crate::credentials::{CredentialResolver, HttpConnector, KubeCredentialResolver};
use crate::error::ControllerError;
use crate::kinds::ManagedKind;
use crate::reconciler::Reconciler;
use crate::references::{KubeProfileLookup, ProfileLookup};
use crate::watcher::{ApiWriter, Context, watch_resource};
use crds::{AutoTag, Email, Profile, Slack};
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Main controller for Dynatrace resource management.
pub struct Controller {
    profile_watcher: JoinHandle<Result<(), ControllerError>>,
    email_watcher: JoinHandle<Result<(), ControllerError>>,
    slack_watcher: JoinHandle<Result<(), ControllerError>>,
    autotag_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance and starts its watchers.
    pub async fn new(config: &ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing Dynatrace Controller");

        let client = Client::try_default().await?;
        let credentials: Arc<dyn CredentialResolver> = Arc::new(KubeCredentialResolver::new(client.clone()));
        let profiles: Arc<dyn ProfileLookup> = Arc::new(KubeProfileLookup::new(client.clone()));

        Ok(Self {
            profile_watcher: spawn_watcher::<Profile>(&client, &credentials, &profiles, config),
            email_watcher: spawn_watcher::<Email>(&client, &credentials, &profiles, config),
            slack_watcher: spawn_watcher::<Slack>(&client, &credentials, &profiles, config),
            autotag_watcher: spawn_watcher::<AutoTag>(&client, &credentials, &profiles, config),
        })
    }

    /// Waits for all watchers to stop.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("Dynatrace Controller running");

        let (profile, email, slack, autotag) = tokio::join!(
            self.profile_watcher,
            self.email_watcher,
            self.slack_watcher,
            self.autotag_watcher,
        );

        let mut first_error = None;
        for (kind, result) in [
            (Profile::KIND, profile),
            (Email::KIND, email),
            (Slack::KIND, slack),
            (AutoTag::KIND, autotag),
        ] {
            let outcome = match result {
                Ok(inner) => inner,
                Err(e) => Err(ControllerError::Watch(format!("{} watcher task failed: {}", kind, e))),
            };
            if let Err(e) = outcome {
                error!("{} watcher error: {}", kind, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Dynatrace Controller stopped");
                Ok(())
            }
        }
    }
}

fn spawn_watcher<K: ManagedKind>(
    client: &Client,
    credentials: &Arc<dyn CredentialResolver>,
    profiles: &Arc<dyn ProfileLookup>,
    config: &ControllerConfig,
) -> JoinHandle<Result<(), ControllerError>> {
    let api: Api<K> = Api::all(client.clone());
    let ctx = Arc::new(Context {
        api: api.clone(),
        writer: Arc::new(ApiWriter::new(api.clone())),
        reconciler: Reconciler::new(Arc::clone(credentials), Arc::new(HttpConnector), Arc::clone(profiles)),
        poll_interval: config.poll_interval,
        backoff: BackoffRegistry::default(),
    });
    let config = config.clone();

    tokio::spawn(async move { watch_resource(api, ctx, &config).await })
}
