//! Store Layer - Core Traits
//!
//! Abstract interface to the external document store holding list
//! documents. Implementations wrap a hosted backend or, for tests, memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::domain::{ListId, ListItem, ShoppingList, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors at the document-store boundary
///
/// The core never interprets transport subtypes beyond "failed"; the inner
/// text is carried for logging and user notification only.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NotFound(String),
    PermissionDenied(String),
    Transport(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Document not found: {}", msg),
            StoreError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            StoreError::Transport(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for crate::domain::DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => crate::domain::DomainError::NotFound(msg),
            other => crate::domain::DomainError::Transport(other.to_string()),
        }
    }
}

/// Emitted after every accepted write, naming the affected owner
///
/// Consumers re-fetch the owner's full collection on receipt; the event
/// carries no document payload on purpose (derived views are recomputed
/// wholesale, never incrementally patched).
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub owner: UserId,
}

/// Completion-state change carried by a patch
///
/// Cost and timestamp always move together so a patch cannot leave a
/// document half-completed.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionChange {
    Completed {
        total_cost: f64,
        completed_at: DateTime<Utc>,
    },
    Reactivated,
}

/// Partial update of one list document
///
/// Item mutations always replace the entire item collection of the parent
/// list (last writer wins); there is no per-item patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPatch {
    pub items: Option<Vec<ListItem>>,
    pub completion: Option<CompletionChange>,
}

impl ListPatch {
    /// Replace the full item collection
    pub fn replace_items(items: Vec<ListItem>) -> Self {
        Self {
            items: Some(items),
            completion: None,
        }
    }

    /// Mark the list purchased
    pub fn completed(total_cost: f64, completed_at: DateTime<Utc>) -> Self {
        Self {
            items: None,
            completion: Some(CompletionChange::Completed {
                total_cost,
                completed_at,
            }),
        }
    }

    /// Put the list back in the active state
    pub fn reactivated() -> Self {
        Self {
            items: None,
            completion: Some(CompletionChange::Reactivated),
        }
    }
}

/// Document store holding list documents
///
/// All operations are async; live consumption is pull-after-notify:
/// subscribe to [`changes`](Self::changes), then re-fetch with
/// [`fetch_for_owner`](Self::fetch_for_owner) on every matching event.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Insert a new list document, returning its id
    async fn create(&self, list: &ShoppingList) -> StoreResult<ListId>;

    /// All documents owned by one identity, in arbitrary but stable order
    async fn fetch_for_owner(&self, owner: &UserId) -> StoreResult<Vec<ShoppingList>>;

    /// Apply a partial update to one document
    async fn patch(&self, id: &ListId, patch: ListPatch) -> StoreResult<()>;

    /// Hard-delete one document
    async fn delete(&self, id: &ListId) -> StoreResult<()>;

    /// Change notifications for every accepted write
    fn changes(&self) -> broadcast::Receiver<StoreEvent>;
}
