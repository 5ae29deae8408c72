//! Domain Layer
//!
//! Core entities and business rules.

mod constants;
mod error;
mod identity;
mod list;

pub use constants::{
    supermarket_label, Choice, DEFAULT_UNIT, MONTHS_ES, OTHER_SUPERMARKET, SUPERMARKETS, UNITS,
    WEEKDAYS_ES,
};
pub use error::{DomainError, DomainResult};
pub use identity::Identity;
pub use list::{ItemId, ListId, ListItem, ShoppingList, UserId};
