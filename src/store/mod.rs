//! Store Layer
//!
//! Document-store abstraction and implementations.

mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::MemoryListStore;
pub use traits::{CompletionChange, ListPatch, ListStore, StoreError, StoreEvent, StoreResult};
