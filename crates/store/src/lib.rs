//! `rxstock-store` — the order lifecycle store.
//!
//! Single source of truth for inventory, suppliers, and purchase orders for
//! one pharmacy session. State lives in memory behind a [`PharmacyStore`]
//! handle; durability is an explicit snapshot boundary
//! ([`snapshot::StoreSnapshot`]), not an automatic side effect.

pub mod scheduler;
pub mod snapshot;
pub mod store;
pub mod worker;

pub use scheduler::ConfirmationScheduler;
pub use snapshot::{SnapshotError, StoreSnapshot, SCHEMA_VERSION};
pub use store::{PharmacyStore, StoreConfig};
pub use worker::{ConfirmationWorkerConfig, ConfirmationWorkerHandle};
