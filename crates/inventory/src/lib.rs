//! Inventory domain module.
//!
//! This crate contains the stock-level status rules and the inventory book,
//! implemented purely as deterministic domain logic (no IO, no UI, no storage).

pub mod item;
pub mod status;

pub use item::{
    AddItem, InventoryBook, InventoryCommand, InventoryEvent, InventoryItem, ItemAdded, ItemForm,
    ItemRemoved, ItemUpdated, RemoveItem, RestockAlert, StatusCounts, UpdateItem,
};
pub use status::{StockStatus, resolve};
