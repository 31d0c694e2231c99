use crate::{
    error::{Result, TaskboardError},
    storage::{CollectionKey, Storage},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;

/// In-memory storage, used by tests and as a scratch backend
#[derive(Default)]
pub struct MemoryStorage {
    collections: Mutex<HashMap<CollectionKey, Vec<Value>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail, for exercising persistence-error
    /// propagation
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: CollectionKey) -> Result<Option<Vec<Value>>> {
        let collections = self.collections.lock().await;
        Ok(collections.get(&key).cloned())
    }

    async fn set(&self, key: CollectionKey, records: Vec<Value>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TaskboardError::Storage(format!(
                "write to '{}' failed",
                key
            )));
        }

        let mut collections = self.collections.lock().await;
        collections.insert(key, records);
        Ok(())
    }
}
