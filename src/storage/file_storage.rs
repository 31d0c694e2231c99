use crate::{
    error::Result,
    storage::{CollectionKey, Storage},
};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one pretty-printed JSON file per collection under an
/// application data directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const APP_DIR: &'static str = ".taskboard";

    /// Creates a new FileStorage rooted at the given directory
    pub fn new(data_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_root.as_ref().join(Self::APP_DIR),
        }
    }

    fn collection_file(&self, key: CollectionKey) -> PathBuf {
        self.root_path.join(format!("{}.json", key.as_str()))
    }

    async fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: CollectionKey) -> Result<Option<Vec<Value>>> {
        let file_path = self.collection_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        let records: Vec<Value> = serde_json::from_str(&contents)?;

        Ok(Some(records))
    }

    async fn set(&self, key: CollectionKey, records: Vec<Value>) -> Result<()> {
        self.ensure_directory_exists().await?;

        let json = serde_json::to_string_pretty(&records)?;
        fs::write(self.collection_file(key), json).await?;

        tracing::debug!(collection = %key, records = records.len(), "collection persisted");
        Ok(())
    }
}
