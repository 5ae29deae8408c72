//! List Aggregate Controller
//!
//! Owns the derived list view for one signed-in identity and translates
//! user intents into single-document writes. The view is re-derived
//! wholesale from the store on every change notification, never patched
//! incrementally; consumers hold snapshots by value through a watch
//! channel.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::domain::{DomainError, DomainResult, ItemId, ListId, ListItem, ShoppingList, UserId};
use crate::store::{ListPatch, ListStore, StoreEvent};

/// Live controller over one identity's list collection
///
/// Mutating operations resolve once the store accepts the write; the
/// derived view catches up on the following change notification. Item
/// operations read-modify-write the full item collection of the parent
/// list, so two concurrent sessions editing the same list race with
/// last-writer-wins semantics.
pub struct ListController {
    store: Arc<dyn ListStore>,
    owner: UserId,
    view: Arc<watch::Sender<Vec<ShoppingList>>>,
    refresh_task: JoinHandle<()>,
}

impl ListController {
    /// Fetch the initial snapshot and start the refresh task
    pub async fn spawn(store: Arc<dyn ListStore>, owner: UserId) -> DomainResult<Self> {
        // Subscribe before the initial fetch so no write falls in the gap.
        let changes = store.changes();
        let initial = sort_newest_first(store.fetch_for_owner(&owner).await?);

        let (tx, _) = watch::channel(initial);
        let view = Arc::new(tx);
        let refresh_task = tokio::spawn(refresh_loop(
            store.clone(),
            owner.clone(),
            view.clone(),
            changes,
        ));

        Ok(Self {
            store,
            owner,
            view,
            refresh_task,
        })
    }

    /// Identity whose lists this controller manages
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Read-only handle on the latest derived view
    pub fn lists(&self) -> watch::Receiver<Vec<ShoppingList>> {
        self.view.subscribe()
    }

    /// Create a new active, empty list
    pub async fn create_list(
        &self,
        name: &str,
        supermarket: &str,
        custom_supermarket: Option<String>,
        shopping_date: NaiveDate,
    ) -> DomainResult<ListId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("list name is empty".to_string()));
        }

        let list = ShoppingList::new(
            self.owner.clone(),
            name.to_string(),
            supermarket.to_string(),
            custom_supermarket,
            shopping_date,
        );
        let id = self.store.create(&list).await?;
        Ok(id)
    }

    /// Append a pending item to a list
    pub async fn add_item(
        &self,
        list_id: &ListId,
        name: &str,
        quantity: f64,
        unit: &str,
    ) -> DomainResult<ItemId> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput("item name is empty".to_string()));
        }

        let mut list = self.find(list_id)?;
        let item = ListItem::new(name.to_string(), quantity, unit.to_string());
        let item_id = item.id.clone();
        list.items.push(item);

        self.store
            .patch(list_id, ListPatch::replace_items(list.items))
            .await?;
        Ok(item_id)
    }

    /// Flip one item's completed flag; siblings are untouched
    pub async fn toggle_item(&self, list_id: &ListId, item_id: &ItemId) -> DomainResult<()> {
        let mut list = self.find(list_id)?;
        if !list.toggle_item(item_id) {
            return Err(DomainError::NotFound(format!(
                "item {} in list {}",
                item_id, list_id
            )));
        }

        self.store
            .patch(list_id, ListPatch::replace_items(list.items))
            .await?;
        Ok(())
    }

    /// Remove one item by id; removing an absent item is a no-op
    pub async fn delete_item(&self, list_id: &ListId, item_id: &ItemId) -> DomainResult<()> {
        let mut list = self.find(list_id)?;
        if !list.remove_item(item_id) {
            return Ok(());
        }

        self.store
            .patch(list_id, ListPatch::replace_items(list.items))
            .await?;
        Ok(())
    }

    /// Toggle between active and purchased
    ///
    /// Completing records the caller-supplied amount (0 when absent) and
    /// the current time; reactivating clears both.
    pub async fn toggle_active(
        &self,
        list_id: &ListId,
        total_cost: Option<f64>,
    ) -> DomainResult<()> {
        let list = self.find(list_id)?;
        let patch = if list.active {
            ListPatch::completed(total_cost.unwrap_or(0.0), Utc::now())
        } else {
            ListPatch::reactivated()
        };

        self.store.patch(list_id, patch).await?;
        Ok(())
    }

    /// Hard-delete a list document
    pub async fn delete_list(&self, list_id: &ListId) -> DomainResult<()> {
        // Stale-reference check against the current snapshot first.
        self.find(list_id)?;
        self.store.delete(list_id).await?;
        Ok(())
    }

    fn find(&self, list_id: &ListId) -> DomainResult<ShoppingList> {
        self.view
            .borrow()
            .iter()
            .find(|l| &l.id == list_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("list {}", list_id)))
    }
}

impl Drop for ListController {
    fn drop(&mut self) {
        // Stop snapshot delivery on teardown; in-flight store writes
        // complete on their own but their results are discarded.
        self.refresh_task.abort();
    }
}

/// Most recently created list first; equal timestamps keep fetch order
fn sort_newest_first(mut lists: Vec<ShoppingList>) -> Vec<ShoppingList> {
    lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    lists
}

async fn refresh_loop(
    store: Arc<dyn ListStore>,
    owner: UserId,
    view: Arc<watch::Sender<Vec<ShoppingList>>>,
    mut changes: broadcast::Receiver<StoreEvent>,
) {
    loop {
        let relevant = match changes.recv().await {
            Ok(event) => event.owner == owner,
            // Missed events carry no payload anyway; refetch to resync.
            Err(broadcast::error::RecvError::Lagged(_)) => true,
            Err(broadcast::error::RecvError::Closed) => break,
        };
        if !relevant {
            continue;
        }

        match store.fetch_for_owner(&owner).await {
            Ok(lists) => {
                let _ = view.send(sort_newest_first(lists));
            }
            // Keep the last good view in place on transport failure.
            Err(e) => log::warn!("list view refresh failed for {}: {}", owner, e),
        }
    }
}
