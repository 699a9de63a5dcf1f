use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult, ItemId};

/// A stocked medication.
///
/// Stock levels are deliberately unconstrained: negative counts are accepted
/// and only surfaced through reporting (`needs_reorder`), never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub generic_name: String,
    /// Units on hand. May go negative (oversold/backordered).
    pub stock: i64,
    /// Reorder threshold; `stock < min_stock` flags the item for reorder.
    pub min_stock: i64,
    /// Dispensing unit, e.g. "tablet" or "bottle".
    pub unit: String,
    /// Current sell price per unit.
    pub unit_price: f64,
    pub category: String,
}

impl InventoryItem {
    /// Build a new item from a creation payload, with a freshly assigned id.
    pub fn new(id: ItemId, payload: NewInventoryItem) -> DomainResult<Self> {
        payload.validate()?;
        Ok(Self {
            id,
            name: payload.name,
            generic_name: payload.generic_name,
            stock: payload.stock,
            min_stock: payload.min_stock,
            unit: payload.unit,
            unit_price: payload.unit_price,
            category: payload.category,
        })
    }

    /// Whether stock has dropped below the reorder threshold.
    pub fn needs_reorder(&self) -> bool {
        self.stock < self.min_stock
    }
}

/// Creation payload: an item minus its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub generic_name: String,
    pub stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub unit_price: f64,
    pub category: String,
}

impl NewInventoryItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }
}

/// Partial update: only set fields are merged into the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

impl InventoryItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge set fields into `item`, leaving unset fields untouched.
    pub fn apply(self, item: &mut InventoryItem) -> DomainResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }

        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(generic_name) = self.generic_name {
            item.generic_name = generic_name;
        }
        if let Some(stock) = self.stock {
            item.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        Ok(())
    }
}
