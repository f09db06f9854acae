//! The item list engine.
//!
//! [`ItemList`] owns the canonical collection. Mutations take `&mut self`, so
//! they run to completion before any view is computed. Each committed mutation
//! hands a snapshot to the [`SaveQueue`]; rejected ones leave both the
//! collection and the store untouched.

pub mod views;

use std::sync::Arc;

use log::debug;

use crate::engine::{ItemStore, SaveQueue};
use crate::model::{Item, ItemFields, ItemId, Rejection};

pub use views::{filter_unbought, format_price, group_by_category, total_remaining, total_summary, CategoryGroup};

pub struct ItemList {
    items: Vec<Item>,
    store: Arc<ItemStore>,
    saves: SaveQueue,
}

impl ItemList {
    /// Loads the stored collection and starts the save worker.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn open(store: Arc<ItemStore>) -> Self {
        let items = store.load().await;
        let saves = SaveQueue::spawn(store.clone());
        Self { items, store, saves }
    }

    /// Replaces the in-memory collection with what the store holds.
    ///
    /// Pending saves are flushed first so the reload sees this session's writes.
    pub async fn reload(&mut self) {
        self.saves.wait().await;
        self.items = self.store.load().await;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &ItemId) -> Result<usize, Rejection> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Rejection::NotFound(id.clone()))
    }

    fn commit(&self) {
        self.saves.enqueue(self.items.clone());
    }

    /// Appends a new unbought item and returns its id.
    pub fn add(&mut self, name: &str, price: f64, category: &str) -> Result<ItemId, Rejection> {
        let item = Item::new(ItemFields::validate(name, price, category)?);
        let id = item.id().clone();
        debug!("Adding item {} ({})", id, item.name());
        self.items.push(item);
        self.commit();
        Ok(id)
    }

    /// Replaces name, price and category of an existing item in place.
    pub fn edit(&mut self, id: &ItemId, name: &str, price: f64, category: &str) -> Result<(), Rejection> {
        let fields = ItemFields::validate(name, price, category)?;
        let pos = self.position(id)?;
        self.items[pos].apply(fields);
        self.commit();
        Ok(())
    }

    /// Flips the bought flag and returns its new value.
    pub fn toggle_bought(&mut self, id: &ItemId) -> Result<bool, Rejection> {
        let pos = self.position(id)?;
        let bought = self.items[pos].toggle();
        self.commit();
        Ok(bought)
    }

    /// Removes an item and returns it.
    pub fn delete(&mut self, id: &ItemId) -> Result<Item, Rejection> {
        let pos = self.position(id)?;
        let item = self.items.remove(pos);
        self.commit();
        Ok(item)
    }

    /// Empties the collection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    pub fn search_unbought(&self, search_term: &str) -> Vec<&Item> {
        filter_unbought(&self.items, search_term)
    }

    pub fn categories(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.items)
    }

    pub fn total_remaining(&self) -> f64 {
        total_remaining(&self.items)
    }

    /// Number of saves not yet written.
    pub fn pending_saves(&self) -> usize {
        self.saves.pending()
    }

    /// Waits until every enqueued save has been written.
    pub async fn flush(&self) {
        self.saves.wait().await;
    }
}
