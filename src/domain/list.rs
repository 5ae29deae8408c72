//! Shopping List Entities
//!
//! A ShoppingList is the unit of storage: its items are always read and
//! written as part of the full list document and never addressed directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constants::{supermarket_label, DEFAULT_UNIT};

/// Opaque identifier of a list document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub String);

impl ListId {
    pub fn generate() -> Self {
        ListId(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of an item within its parent list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn generate() -> Self {
        ItemId(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the owning identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of a shopping list
///
/// Quantity is whatever the entry form accepted, zero and fractions
/// included; the name may embed an emoji grapheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub completed: bool,
}

impl ListItem {
    /// Create a new pending item; a blank unit falls back to the default
    pub fn new(name: String, quantity: f64, unit: String) -> Self {
        let unit = if unit.trim().is_empty() {
            DEFAULT_UNIT.to_string()
        } else {
            unit
        };
        Self {
            id: ItemId::generate(),
            name,
            quantity,
            unit,
            completed: false,
        }
    }
}

/// A shopping list owned by exactly one identity
///
/// Invariant: `active == true` ⇔ `total_cost` and `completed_at` are both
/// `None`. State changes go through [`complete`](Self::complete) and
/// [`reactivate`](Self::reactivate) so the pair always moves together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    pub supermarket: String,
    pub custom_supermarket: Option<String>,
    pub shopping_date: NaiveDate,
    pub items: Vec<ListItem>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub total_cost: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ShoppingList {
    /// Create a new active list with no items
    pub fn new(
        user_id: UserId,
        name: String,
        supermarket: String,
        custom_supermarket: Option<String>,
        shopping_date: NaiveDate,
    ) -> Self {
        Self {
            id: ListId::generate(),
            user_id,
            name,
            supermarket,
            custom_supermarket,
            shopping_date,
            items: Vec::new(),
            active: true,
            created_at: Utc::now(),
            total_cost: None,
            completed_at: None,
        }
    }

    /// Transition active → completed, recording the purchase
    pub fn complete(&mut self, total_cost: f64, completed_at: DateTime<Utc>) {
        self.active = false;
        self.total_cost = Some(total_cost);
        self.completed_at = Some(completed_at);
    }

    /// Transition completed → active, clearing cost and timestamp
    pub fn reactivate(&mut self) {
        self.active = true;
        self.total_cost = None;
        self.completed_at = None;
    }

    /// Whether the active/cost invariant holds
    pub fn is_consistent(&self) -> bool {
        self.active == (self.total_cost.is_none() && self.completed_at.is_none())
    }

    /// Store name to display: the free-text store wins over the enum value
    pub fn store_label(&self) -> &str {
        match &self.custom_supermarket {
            Some(custom) if !custom.is_empty() => custom,
            _ => supermarket_label(&self.supermarket),
        }
    }

    /// Flip one item's completed flag; false if the id is unknown
    pub fn toggle_item(&mut self, item_id: &ItemId) -> bool {
        match self.items.iter_mut().find(|i| &i.id == item_id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Remove one item by id; false if it was already absent
    pub fn remove_item(&mut self, item_id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        self.items.len() != before
    }
}
