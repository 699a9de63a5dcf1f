//! `rxstock-ordering` — purchase orders and their status lifecycle.

pub mod order;

pub use order::{NewOrder, Order, OrderStatus};
