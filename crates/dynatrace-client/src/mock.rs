//! Mock SettingsService for unit testing
//!
//! Stores values in memory, counts calls per operation and can be told to
//! fail an operation with a given status code.

use crate::error::DynatraceError;
use crate::models::Stub;
use crate::service::SettingsService;
use crate::settings::Settings;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Operations of `SettingsService`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
}

/// Mock SettingsService for testing
///
/// Clones share state, so a test can keep one handle and give another to
/// the code under test.
#[derive(Clone)]
pub struct MockSettingsService<V> {
    objects: Arc<Mutex<HashMap<String, V>>>,
    calls: Arc<Mutex<HashMap<Operation, usize>>>,
    failures: Arc<Mutex<HashMap<Operation, u16>>>,
    next_id: Arc<Mutex<u64>>,
}

impl<V> fmt::Debug for MockSettingsService<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSettingsService").finish_non_exhaustive()
    }
}

impl<V> Default for MockSettingsService<V> {
    fn default() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }
}

impl<V: Settings> MockSettingsService<V> {
    /// Create an empty mock service
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an object into the mock store (for test setup)
    pub fn insert(&self, id: impl Into<String>, value: V) {
        self.objects.lock().unwrap().insert(id.into(), value);
    }

    /// Current value stored under `id`
    pub fn stored(&self, id: &str) -> Option<V> {
        self.objects.lock().unwrap().get(id).cloned()
    }

    /// Remove an object behind the controller's back
    pub fn remove(&self, id: &str) -> Option<V> {
        self.objects.lock().unwrap().remove(id)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times `op` was called
    pub fn calls(&self, op: Operation) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    /// Number of writes (create, update, delete)
    pub fn writes(&self) -> usize {
        self.calls(Operation::Create) + self.calls(Operation::Update) + self.calls(Operation::Delete)
    }

    /// Make every subsequent `op` fail with status `code`
    pub fn fail_with(&self, op: Operation, code: u16) {
        self.failures.lock().unwrap().insert(op, code);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    fn record(&self, op: Operation) -> Result<(), DynatraceError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;
        match self.failures.lock().unwrap().get(&op) {
            Some(code) => Err(DynatraceError::Api {
                code: *code,
                message: format!("injected {:?} failure", op),
            }),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> String {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        format!("vu9U3hXa3q0AAAABA{:08}", current)
    }

    fn not_found(id: &str) -> DynatraceError {
        DynatraceError::Api {
            code: 404,
            message: format!("Settings not found: {}", id),
        }
    }
}

#[async_trait::async_trait]
impl<V: Settings> SettingsService<V> for MockSettingsService<V> {
    async fn get(&self, id: &str) -> Result<V, DynatraceError> {
        self.record(Operation::Get)?;
        self.stored(id).ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, value: &V) -> Result<Stub, DynatraceError> {
        self.record(Operation::Create)?;
        let id = self.next_id();
        self.insert(id.clone(), value.clone());
        Ok(Stub { id })
    }

    async fn update(&self, id: &str, value: &V) -> Result<(), DynatraceError> {
        self.record(Operation::Update)?;
        let mut objects = self.objects.lock().unwrap();
        match objects.get_mut(id) {
            Some(existing) => {
                *existing = value.clone();
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DynatraceError> {
        self.record(Operation::Delete)?;
        self.remove(id).map(|_| ()).ok_or_else(|| Self::not_found(id))
    }
}
