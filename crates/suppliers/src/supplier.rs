use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult, SupplierId};

/// A wholesale supplier the pharmacy can order from.
///
/// Static reference data: registered once, then only read for quoting and
/// order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    /// Service rating on a 0–5 scale.
    pub rating: f32,
    /// Free-text delivery ETA, e.g. "2-3 days".
    pub delivery_time: String,
}

impl Supplier {
    pub fn new(id: SupplierId, payload: NewSupplier) -> DomainResult<Self> {
        if payload.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !(0.0..=5.0).contains(&payload.rating) {
            return Err(DomainError::validation("rating must be within 0..=5"));
        }
        Ok(Self {
            id,
            name: payload.name,
            rating: payload.rating,
            delivery_time: payload.delivery_time,
        })
    }
}

/// Registration payload: a supplier minus its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub rating: f32,
    pub delivery_time: String,
}
