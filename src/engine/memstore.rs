use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use crate::{Result, Error, KVReader, KVWriter};
use crate::engine::Persistence;

/// An in-memory string key-value store, optionally written through to disk.
///
/// Writes update the map first and then the backing [`Persistence`]; the call
/// returns once the disk write has finished.
pub struct MemStore {
    data: RwLock<HashMap<String, String>>,
    persistence: Option<Arc<Persistence>>,
}

impl MemStore {
    pub fn new(initial_data: HashMap<String, String>, persistence: Option<Arc<Persistence>>) -> Self {
        Self {
            data: RwLock::new(initial_data),
            persistence,
        }
    }

    /// Creates a purely in-memory store.
    pub fn in_memory() -> Self {
        Self::new(HashMap::new(), None)
    }

    async fn persist(&self, key: String, value: String) -> Result<()> {
        let Some(p) = &self.persistence else {
            return Ok(());
        };
        let p = p.clone();
        tokio::task::spawn_blocking(move || p.save_key(&key, &value))
        .await
        .map_err(|e| Error::Internal(e.to_string()))?
    }
}

#[async_trait]
impl KVReader for MemStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.read().map_err(|_| Error::Internal("store lock poisoned".to_string()))?;
        Ok(data.get(key).cloned())
    }
}

#[async_trait]
impl KVWriter for MemStore {
    async fn set(&self, key: &str, value: String) -> Result<()> {
        {
            let mut data = self.data.write().map_err(|_| Error::Internal("store lock poisoned".to_string()))?;
            data.insert(key.to_string(), value.clone());
        }
        self.persist(key.to_string(), value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memstore_get_set() {
        let store = MemStore::in_memory();
        assert_eq!(store.get("k1").await.unwrap(), None);

        store.set("k1", "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some("v1".to_string()));

        store.set("k1", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some("v2".to_string()));
    }

    #[tokio::test]
    async fn test_write_through() {
        let dir = tempdir().unwrap();
        let persistence = Arc::new(Persistence::new(dir.path()).unwrap());
        let store = MemStore::new(HashMap::new(), Some(persistence.clone()));

        store.set("k1", "v1".to_string()).await.unwrap();
        assert_eq!(persistence.load_all().unwrap()["k1"], "v1");

        store.set("k1", "v2".to_string()).await.unwrap();
        let reopened = MemStore::new(persistence.load_all().unwrap(), Some(persistence));
        assert_eq!(reopened.get("k1").await.unwrap(), Some("v2".to_string()));
    }
}
