use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::Arc;
use log::warn;
use crate::engine::{ItemStore, MemStore, Persistence};
use crate::{ItemList, Result};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "SHOPLIST_DATA_DIR";

/// Directory used when neither an argument nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Picks the data directory: explicit argument, then [`DATA_DIR_ENV`], then [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(arg: Option<String>) -> String {
    arg.or_else(|| env::var(DATA_DIR_ENV).ok().filter(|dir| !dir.is_empty()))
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
}

/// Opens the item list stored in `data_dir`.
///
/// Builds a [`MemStore`] written through to [`Persistence`] in `data_dir`, then
/// loads the collection from it. Only creating the directory can fail; a
/// missing or unreadable collection opens as an empty list.
///
/// # Examples
///
/// ```no_run
/// use shoplist::session;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut list = session::open("./data").await?;
///     list.add("Milk", 45.5, "Dairy")?;
///     list.flush().await;
///     Ok(())
/// }
/// ```
pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<ItemList> {
    let persistence = Arc::new(Persistence::new(data_dir)?);
    let initial_data = persistence.load_all().unwrap_or_else(|e| {
        warn!("Failed to scan data directory: {}", e);
        HashMap::new()
    });
    let kv = Arc::new(MemStore::new(initial_data, Some(persistence)));
    let store = Arc::new(ItemStore::new(kv));
    Ok(ItemList::open(store).await)
}
