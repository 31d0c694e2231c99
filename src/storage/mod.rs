use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

pub mod file_storage;
pub mod memory;

/// The three persisted collections of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Tasks,
    DeletedTasks,
    StatusColumns,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [
        CollectionKey::Tasks,
        CollectionKey::DeletedTasks,
        CollectionKey::StatusColumns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::DeletedTasks => "deletedTasks",
            Self::StatusColumns => "statusColumns",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage port for the three JSON collections, implemented by the host
/// environment (key-value store, file system, in-memory for tests).
///
/// Collections are always read and written as whole snapshots; there is no
/// partial-update contract.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads a collection. `None` means the collection has never been
    /// written; callers treat that as empty.
    async fn get(&self, key: CollectionKey) -> Result<Option<Vec<Value>>>;

    /// Replaces a collection with the given snapshot
    async fn set(&self, key: CollectionKey, records: Vec<Value>) -> Result<()>;
}
