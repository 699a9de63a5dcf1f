use serde::{Deserialize, Serialize};

use rxstock_core::SupplierId;

/// A computed, non-authoritative per-unit price estimate from one supplier.
///
/// Ephemeral: computed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierQuote {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    /// Per-unit price, rounded to 2 decimals.
    pub price: f64,
    pub rating: f32,
    pub delivery_time: String,
    pub in_stock: bool,
}

/// Round a price to 2 decimal places.
pub fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_cents(0.2049), 0.20);
        assert_eq!(round_to_cents(0.216), 0.22);
        assert_eq!(round_to_cents(0.25), 0.25);
    }
}
