use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rxstock_suppliers::Supplier;

use crate::quote::{round_to_cents, SupplierQuote};

/// Source of per-supplier price quotes for an item.
///
/// Contract: one quote per supplier, in the same order as `suppliers`.
/// Callers sort for presentation; implementations only price.
pub trait QuoteProvider: Send + Sync {
    fn quotes(&self, item_name: &str, suppliers: &[Supplier]) -> Vec<SupplierQuote>;
}

/// Base per-unit price every simulated quote starts from.
pub const BASE_PRICE: f64 = 0.20;
/// Half-width of the uniform noise term, sampled from `[-NOISE_SPAN, +NOISE_SPAN)`.
pub const NOISE_SPAN: f64 = 0.05;
/// Deterministic per-supplier increment applied by position in the supplier list.
pub const SUPPLIER_STEP: f64 = 0.02;
/// Probability that a supplier reports the item in stock.
pub const IN_STOCK_PROBABILITY: f64 = 0.8;

/// Randomized quote simulation.
///
/// This is explicitly a **simulation**, not a deterministic lookup: repeated
/// calls for the same item return different prices. Each supplier's price is
/// `base + noise + index * SUPPLIER_STEP`, rounded to 2 decimals, with noise
/// drawn uniformly from `[-NOISE_SPAN, +NOISE_SPAN)`. Availability is an
/// independent coin flip per call with [`IN_STOCK_PROBABILITY`].
///
/// Tests should assert distribution properties (bounds, length, ordering
/// after sort), never exact values. Use [`SimulatedQuoteProvider::seeded`]
/// for reproducible sequences.
pub struct SimulatedQuoteProvider {
    base_price: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedQuoteProvider {
    pub fn new() -> Self {
        Self {
            base_price: BASE_PRICE,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            base_price: BASE_PRICE,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    /// Inclusive lower / exclusive upper bound of any price this provider can
    /// emit for a list of `supplier_count` suppliers (before rounding).
    pub fn price_bounds(&self, supplier_count: usize) -> (f64, f64) {
        let max_step = supplier_count.saturating_sub(1) as f64 * SUPPLIER_STEP;
        (
            self.base_price - NOISE_SPAN,
            self.base_price + NOISE_SPAN + max_step,
        )
    }
}

impl Default for SimulatedQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for SimulatedQuoteProvider {
    fn quotes(&self, _item_name: &str, suppliers: &[Supplier]) -> Vec<SupplierQuote> {
        let mut rng = self.rng.lock().unwrap();

        suppliers
            .iter()
            .enumerate()
            .map(|(idx, supplier)| {
                let noise = rng.gen_range(-NOISE_SPAN..NOISE_SPAN);
                let price = round_to_cents(self.base_price + noise + idx as f64 * SUPPLIER_STEP);
                SupplierQuote {
                    supplier_id: supplier.id,
                    supplier_name: supplier.name.clone(),
                    price,
                    rating: supplier.rating,
                    delivery_time: supplier.delivery_time.clone(),
                    in_stock: rng.gen_bool(IN_STOCK_PROBABILITY),
                }
            })
            .collect()
    }
}
