//! Dynatrace Settings 2.0 REST API Client
//!
//! Typed access to the settings objects managed by the Dynatrace provider:
//! alerting profiles, problem notifications and auto-tags.
//!
//! # Example
//!
//! ```no_run
//! use dynatrace_client::{Credentials, HttpSettingsService, SettingsClient, SettingsService};
//! use dynatrace_client::models::autotagging::AutoTag;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_json(br#"{"url":"https://abc123.live.dynatrace.com","token":"dt0c01.x"}"#)?;
//! let service = HttpSettingsService::<AutoTag>::new(SettingsClient::new(&creds)?);
//!
//! let stub = service.create(&AutoTag { name: "team".to_string(), ..Default::default() }).await?;
//! let current = service.get(&stub.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod service;
pub mod settings;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::SettingsClient;
pub use credentials::Credentials;
pub use error::DynatraceError;
pub use models::{SettingsObject, Stub};
pub use service::{HttpSettingsService, SettingsService};
pub use settings::Settings;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockSettingsService, Operation};
