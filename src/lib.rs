//! Shopping-List Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - store: Document-store abstraction and implementations
//! - auth: Identity collaborator boundary
//! - controller / stats: Derived views and mutation intents per identity
//! - share: Plain-text export
//!
//! Persistence and identity live in external hosted services consumed
//! through the [`store::ListStore`] and [`auth::IdentityProvider`] traits;
//! the core keeps no durable state beyond in-memory derived views.

pub mod auth;
pub mod controller;
pub mod domain;
pub mod share;
pub mod stats;
pub mod store;

pub use auth::{AuthError, AuthSession, IdentityProvider};
pub use controller::ListController;
pub use domain::{DomainError, DomainResult, Identity, ItemId, ListId, ListItem, ShoppingList, UserId};
pub use share::format_list_for_share;
pub use stats::{MonthlyStats, StatsProjector, StatsSnapshot};
pub use store::{ListPatch, ListStore, MemoryListStore, StoreError, StoreEvent};
