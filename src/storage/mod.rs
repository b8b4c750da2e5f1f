mod migration;
pub mod sqlite;

use std::sync::Arc;

use crate::config::{StorageConfig, ensure_parent_dir, resolve_path};
use async_trait::async_trait;
use eyre::{Context, Result};
use sqlite::Sqlite;

/// Durable key/value store for session data and preferences.
#[async_trait]
pub trait Storage {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

pub type ArcStorage = Arc<dyn Storage + Send + Sync>;

pub async fn new_storage(config: &StorageConfig) -> Result<ArcStorage> {
    let storage = match config {
        StorageConfig::Sqlite(sqlite_config) => {
            let path = match sqlite_config.path() {
                Some(path) => {
                    let path = resolve_path(path)
                        .wrap_err(format!("resolving storage path {}", path))?;
                    ensure_parent_dir(&path)?;
                    Some(path)
                }
                None => None,
            };
            Arc::new(Sqlite::new(path.as_deref()).await?)
        }
    };
    Ok(storage)
}
