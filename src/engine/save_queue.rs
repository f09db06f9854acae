use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use log::error;
use tokio::sync::mpsc;
use crate::engine::ItemStore;
use crate::model::Item;

/// Single in-flight save queue.
///
/// Snapshots are handed to one background task that writes them one after
/// another, so the blob on disk always ends up matching the most recently
/// enqueued snapshot. Must be created inside a tokio runtime.
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<Vec<Item>>,
    pending_tasks: Arc<AtomicUsize>,
}

impl SaveQueue {
    pub fn spawn(store: Arc<ItemStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Item>>();
        let pending_tasks = Arc::new(AtomicUsize::new(0));

        let pending = pending_tasks.clone();
        tokio::spawn(async move {
            while let Some(snapshot) = rx.recv().await {
                store.save(&snapshot).await;
                pending.fetch_sub(1, Ordering::SeqCst);
            }
        });

        Self { tx, pending_tasks }
    }

    /// Enqueues a snapshot without waiting for it to be written.
    pub fn enqueue(&self, snapshot: Vec<Item>) {
        self.pending_tasks.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(snapshot).is_err() {
            self.pending_tasks.fetch_sub(1, Ordering::SeqCst);
            error!("Save worker has stopped; snapshot dropped");
        }
    }

    /// Number of snapshots enqueued but not yet written.
    pub fn pending(&self) -> usize {
        self.pending_tasks.load(Ordering::SeqCst)
    }

    /// Waits until every enqueued snapshot has been written.
    pub async fn wait(&self) {
        while self.pending_tasks.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}
