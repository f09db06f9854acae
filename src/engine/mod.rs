pub mod item_store;
pub mod memstore;
pub mod persistence;
pub mod save_queue;

pub use item_store::ItemStore;
pub use memstore::MemStore;
pub use persistence::Persistence;
pub use save_queue::SaveQueue;
