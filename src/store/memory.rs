//! In-Memory Store
//!
//! Reference implementation of [`ListStore`] backed by a HashMap. Used by
//! the test suite and as the local backend when no hosted store is wired.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use crate::domain::{ListId, ShoppingList, UserId};

use super::traits::{CompletionChange, ListPatch, ListStore, StoreError, StoreEvent, StoreResult};

const EVENT_CAPACITY: usize = 64;

/// HashMap-backed document store with broadcast change notifications
pub struct MemoryListStore {
    docs: Mutex<HashMap<ListId, ShoppingList>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            docs: Mutex::new(HashMap::new()),
            events,
        }
    }

    fn notify(&self, owner: UserId) {
        // No receivers is fine; nobody is subscribed yet.
        let _ = self.events.send(StoreEvent { owner });
    }
}

impl Default for MemoryListStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn create(&self, list: &ShoppingList) -> StoreResult<ListId> {
        let mut docs = self.docs.lock().await;
        docs.insert(list.id.clone(), list.clone());
        let owner = list.user_id.clone();
        drop(docs);

        self.notify(owner);
        Ok(list.id.clone())
    }

    async fn fetch_for_owner(&self, owner: &UserId) -> StoreResult<Vec<ShoppingList>> {
        let docs = self.docs.lock().await;
        let mut lists: Vec<ShoppingList> = docs
            .values()
            .filter(|l| &l.user_id == owner)
            .cloned()
            .collect();
        // Stable iteration order for callers that break ties on position
        lists.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(lists)
    }

    async fn patch(&self, id: &ListId, patch: ListPatch) -> StoreResult<()> {
        let mut docs = self.docs.lock().await;
        let list = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(items) = patch.items {
            list.items = items;
        }
        match patch.completion {
            Some(CompletionChange::Completed {
                total_cost,
                completed_at,
            }) => list.complete(total_cost, completed_at),
            Some(CompletionChange::Reactivated) => list.reactivate(),
            None => {}
        }

        let owner = list.user_id.clone();
        drop(docs);

        self.notify(owner);
        Ok(())
    }

    async fn delete(&self, id: &ListId) -> StoreResult<()> {
        let mut docs = self.docs.lock().await;
        let removed = docs
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        drop(docs);

        self.notify(removed.user_id);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
