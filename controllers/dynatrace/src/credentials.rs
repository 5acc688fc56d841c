//! Credential resolution and client construction
//!
//! A managed resource names a `ProviderConfig`, which points at the JSON
//! credentials in a Secret key or an environment variable. The decoded
//! credentials are used to build a short-lived Settings API client.

use crate::error::ControllerError;
use crds::{CredentialsSource, ProviderConfig};
use dynatrace_client::{Credentials, HttpSettingsService, Settings, SettingsClient, SettingsService};
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use std::sync::Arc;
use tracing::debug;

/// Resolves credentials for a ProviderConfig name
#[async_trait::async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn resolve(&self, provider_config: &str) -> Result<Credentials, ControllerError>;
}

/// Builds a Settings API client for schema `V`
pub trait Connector<V: Settings>: Send + Sync {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn SettingsService<V>>, ControllerError>;
}

/// Connector producing HTTP clients
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl<V: Settings> Connector<V> for HttpConnector {
    fn connect(&self, credentials: &Credentials) -> Result<Arc<dyn SettingsService<V>>, ControllerError> {
        let client = SettingsClient::new(credentials)?;
        Ok(Arc::new(HttpSettingsService::<V>::new(client)))
    }
}

/// Reads ProviderConfigs and Secrets from the cluster
#[derive(Clone)]
pub struct KubeCredentialResolver {
    client: Client,
}

impl KubeCredentialResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CredentialResolver for KubeCredentialResolver {
    async fn resolve(&self, provider_config: &str) -> Result<Credentials, ControllerError> {
        let configs: Api<ProviderConfig> = Api::all(self.client.clone());
        let pc = configs.get_opt(provider_config).await?.ok_or_else(|| {
            ControllerError::Credentials(format!("ProviderConfig {} not found", provider_config))
        })?;

        let creds = &pc.spec.credentials;
        match creds.source {
            CredentialsSource::Secret => {
                let selector = creds.secret_ref.as_ref().ok_or_else(|| {
                    ControllerError::Credentials(format!(
                        "ProviderConfig {} uses source Secret but has no secretRef",
                        provider_config
                    ))
                })?;
                debug!(
                    "Reading credentials from secret {}/{} key {}",
                    selector.namespace, selector.name, selector.key
                );
                let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &selector.namespace);
                let secret = secrets.get_opt(&selector.name).await?.ok_or_else(|| {
                    ControllerError::Credentials(format!(
                        "secret {}/{} not found",
                        selector.namespace, selector.name
                    ))
                })?;
                secret_credentials(&secret, &selector.key)
            }
            CredentialsSource::Environment => {
                let env = creds.env.as_ref().ok_or_else(|| {
                    ControllerError::Credentials(format!(
                        "ProviderConfig {} uses source Environment but has no env",
                        provider_config
                    ))
                })?;
                env_credentials(&env.name, |key| std::env::var(key).ok())
            }
        }
    }
}

/// Decode credentials stored under `key` of a Secret
pub fn secret_credentials(secret: &Secret, key: &str) -> Result<Credentials, ControllerError> {
    let name = secret.metadata.name.as_deref().unwrap_or("<unnamed>");

    let bytes = secret
        .data
        .as_ref()
        .and_then(|d| d.get(key))
        .map(|b| b.0.clone())
        .or_else(|| {
            secret
                .string_data
                .as_ref()
                .and_then(|d| d.get(key))
                .map(|s| s.clone().into_bytes())
        })
        .ok_or_else(|| ControllerError::Credentials(format!("secret {} has no key {}", name, key)))?;

    Ok(Credentials::from_json(&bytes)?)
}

/// Decode credentials held in environment variable `name`
pub fn env_credentials<F>(name: &str, lookup: F) -> Result<Credentials, ControllerError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)
        .ok_or_else(|| ControllerError::Credentials(format!("environment variable {} is not set", name)))?;
    Ok(Credentials::from_json(raw.as_bytes())?)
}
