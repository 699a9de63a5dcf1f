//! `rxstock-inventory` — pharmacy stock-keeping records.

pub mod item;

pub use item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
