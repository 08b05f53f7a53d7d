use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Durable string-keyed dictionary of JSON values.
///
/// Implementations can be file-backed, database-backed, or remote KV.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError>;
    /// Overwrite the value stored under `key`.
    async fn update(&self, key: &str, value: Value) -> Result<(), ServiceError>;
    /// Atomic read-modify-write of a single key; returns the value written.
    /// Nothing is written when `f` fails.
    async fn modify<F>(&self, key: &str, f: F) -> Result<Value, ServiceError>
    where
        F: FnOnce(Option<Value>) -> Result<Value, ServiceError> + Send;
}

/// File-backed `KvStore`: all keys live in one JSON object on disk.
pub struct FileKvStore {
    store: Arc<JsonMapStore<String, Value>>,
}

impl FileKvStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Value>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        Ok(self.store.get(&key.to_string()).await)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.store.insert(key.to_string(), value).await
    }

    async fn update(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.store.insert(key.to_string(), value).await
    }

    async fn modify<F>(&self, key: &str, f: F) -> Result<Value, ServiceError>
    where
        F: FnOnce(Option<Value>) -> Result<Value, ServiceError> + Send,
    {
        let mut written = Value::Null;
        self.store
            .update_map(|map| {
                let next = f(map.get(key).cloned())?;
                map.insert(key.to_string(), next.clone());
                written = next;
                Ok(())
            })
            .await?;
        Ok(written)
    }
}
