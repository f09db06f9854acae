//! Shoplist is the core of a local-first shopping list.
//!
//! The canonical item collection lives in memory inside an [`ItemList`] and is
//! persisted as a single JSON blob under one fixed key of a key-value store.
//! Every committed mutation enqueues a save; saves are applied strictly in the
//! order the mutations were issued.
//!
//! ## Core Components
//! - [`model`]: The [`Item`] record and its validating constructor.
//! - [`engine`]: Key-value backends and the persistent item store.
//! - [`list`]: The item list engine and its derived views.
//! - [`session`]: Wiring an on-disk store to an engine.

pub mod engine;
pub mod list;
pub mod model;
pub mod session;

use async_trait::async_trait;
use thiserror::Error;

pub use list::ItemList;
pub use model::{Item, ItemId, Rejection};

/// Errors returned by the storage layer.
#[derive(Error, Debug)]
pub enum Error {
    /// The stored blob parsed but breaks a collection invariant.
    #[error("corrupt collection: {0}")]
    Corrupt(String),
    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The key-value slot holding the serialized collection.
pub const STORAGE_KEY: &str = "shoppingItems";

/// Read access to a string key-value store.
#[async_trait]
pub trait KVReader: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Write access to a string key-value store.
#[async_trait]
pub trait KVWriter: Send + Sync {
    /// Stores `value` under `key`, fully replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// A complete key-value backend.
pub trait KeyValueStore: KVReader + KVWriter {}

impl<T: KVReader + KVWriter> KeyValueStore for T {}
