//! Typed CRUD over one settings schema
//!
//! `SettingsService` is the seam controllers depend on. The HTTP
//! implementation talks to Dynatrace; tests use `MockSettingsService`.

use crate::client::SettingsClient;
use crate::error::DynatraceError;
use crate::models::{SettingsObjectCreate, Stub};
use crate::settings::Settings;
use std::fmt;
use std::marker::PhantomData;

/// CRUD operations for values of schema `V`
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait SettingsService<V: Settings>: Send + Sync {
    /// Fetch the current value; a missing object is an API error with code 404
    async fn get(&self, id: &str) -> Result<V, DynatraceError>;

    async fn create(&self, value: &V) -> Result<Stub, DynatraceError>;

    async fn update(&self, id: &str, value: &V) -> Result<(), DynatraceError>;

    async fn delete(&self, id: &str) -> Result<(), DynatraceError>;
}

/// `SettingsService` backed by the Settings 2.0 REST API
pub struct HttpSettingsService<V> {
    client: SettingsClient,
    _schema: PhantomData<fn() -> V>,
}

impl<V> HttpSettingsService<V> {
    pub fn new(client: SettingsClient) -> Self {
        Self { client, _schema: PhantomData }
    }
}

impl<V> fmt::Debug for HttpSettingsService<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSettingsService").field("client", &self.client).finish()
    }
}

#[async_trait::async_trait]
impl<V: Settings> SettingsService<V> for HttpSettingsService<V> {
    async fn get(&self, id: &str) -> Result<V, DynatraceError> {
        let object = self.client.get_object(id).await?;
        if !object.schema_id.is_empty() && object.schema_id != V::SCHEMA_ID {
            return Err(DynatraceError::InvalidResponse(format!(
                "object {} belongs to schema {}, expected {}",
                id, object.schema_id, V::SCHEMA_ID
            )));
        }
        Ok(serde_json::from_value(object.value)?)
    }

    async fn create(&self, value: &V) -> Result<Stub, DynatraceError> {
        let object = SettingsObjectCreate {
            schema_id: V::SCHEMA_ID.to_string(),
            scope: V::SCOPE.to_string(),
            value: serde_json::to_value(value)?,
        };
        let id = self.client.create_object(&object).await?;
        Ok(Stub { id })
    }

    async fn update(&self, id: &str, value: &V) -> Result<(), DynatraceError> {
        self.client.update_object(id, serde_json::to_value(value)?).await
    }

    async fn delete(&self, id: &str) -> Result<(), DynatraceError> {
        self.client.delete_object(id).await
    }
}
