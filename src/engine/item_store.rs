use std::sync::Arc;
use log::{debug, error, warn};
use crate::model::{check_collection, Item};
use crate::{KeyValueStore, Result, STORAGE_KEY};

/// Durable storage of the whole item collection as one JSON blob.
///
/// [`load`](ItemStore::load) and [`save`](ItemStore::save) never fail: problems
/// are logged and the in-memory collection stays authoritative. The `try_`
/// variants expose the underlying error.
pub struct ItemStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl ItemStore {
    /// Binds the store to the fixed [`STORAGE_KEY`] slot of `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, STORAGE_KEY)
    }

    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self { kv, key: key.to_string() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the stored collection. `Ok(None)` means the slot is empty.
    pub async fn try_load(&self) -> Result<Option<Vec<Item>>> {
        let Some(blob) = self.kv.get(&self.key).await? else {
            return Ok(None);
        };
        let items: Vec<Item> = serde_json::from_str(&blob)?;
        check_collection(&items)?;
        Ok(Some(items))
    }

    /// Loads the stored collection, falling back to an empty one.
    pub async fn load(&self) -> Vec<Item> {
        match self.try_load().await {
            Ok(Some(items)) => {
                debug!("Loaded {} items from {:?}", items.len(), self.key);
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load items from {:?}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Serializes `items` and overwrites the stored blob.
    pub async fn try_save(&self, items: &[Item]) -> Result<()> {
        let blob = serde_json::to_string(items)?;
        self.kv.set(&self.key, blob).await
    }

    /// Best-effort save; failures are logged and swallowed.
    pub async fn save(&self, items: &[Item]) {
        match self.try_save(items).await {
            Ok(()) => debug!("Saved {} items to {:?}", items.len(), self.key),
            Err(e) => error!("Failed to save items to {:?}: {}", self.key, e),
        }
    }
}
