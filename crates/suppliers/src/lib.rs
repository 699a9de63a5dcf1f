//! `rxstock-suppliers` — wholesale supplier reference data.

pub mod supplier;

pub use supplier::{NewSupplier, Supplier};
