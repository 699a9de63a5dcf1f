use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult, ItemId, OrderId, SupplierId};

/// Purchase order status lifecycle.
///
/// Transitions are forward-only in declaration order: `Pending` →
/// `Confirmed` → `Shipped` → `Delivered`. Forward skips are allowed (a
/// supplier feed may report `Shipped` before we ever saw `Confirmed`);
/// regressions are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// Whether a direct update from `self` to `next` is legal.
    ///
    /// Equal statuses are legal (idempotent updates).
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next.rank() >= self.rank()
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: i64,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    /// Quoted price per unit.
    pub unit_price: f64,
    /// Taken verbatim from the caller; never recomputed from
    /// `quantity * unit_price`.
    pub total_cost: f64,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    /// Free-text ETA carried over from the supplier record.
    pub estimated_delivery: String,
}

impl Order {
    /// Build an order from a creation payload.
    ///
    /// The status is forced to `Pending` and `order_date` stamped with the
    /// supplied creation time, regardless of what the caller intended.
    pub fn create(id: OrderId, payload: NewOrder, now: DateTime<Utc>) -> DomainResult<Self> {
        payload.validate()?;
        Ok(Self {
            id,
            item_id: payload.item_id,
            item_name: payload.item_name,
            quantity: payload.quantity,
            supplier_id: payload.supplier_id,
            supplier_name: payload.supplier_name,
            unit_price: payload.unit_price,
            total_cost: payload.total_cost,
            status: OrderStatus::Pending,
            order_date: now,
            estimated_delivery: payload.estimated_delivery,
        })
    }

    /// Apply a direct status update.
    ///
    /// Returns `true` if the status changed, `false` for an idempotent
    /// same-status update. Regressions (e.g. `Delivered` → `Pending`) are
    /// rejected.
    pub fn transition_to(&mut self, next: OrderStatus) -> DomainResult<bool> {
        if self.status == next {
            return Ok(false);
        }
        if !self.status.can_advance_to(next) {
            return Err(DomainError::invariant(format!(
                "cannot move order from {:?} back to {:?}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(true)
    }
}

/// Creation payload: an order minus id, date, and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: i64,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub unit_price: f64,
    pub total_cost: f64,
    pub estimated_delivery: String,
}

impl NewOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metformin_order() -> NewOrder {
        NewOrder {
            item_id: ItemId::new(),
            item_name: "Metformin".to_string(),
            quantity: 50,
            supplier_id: SupplierId::new(),
            supplier_name: "MedSupply Direct".to_string(),
            unit_price: 0.15,
            total_cost: 7.5,
            estimated_delivery: "2-3 days".to_string(),
        }
    }

    #[test]
    fn create_forces_pending_and_keeps_total_cost_verbatim() {
        let now = Utc::now();
        // total_cost deliberately inconsistent with quantity * unit_price.
        let payload = NewOrder {
            total_cost: 99.0,
            ..metformin_order()
        };
        let order = Order::create(OrderId::new(), payload, now).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_date, now);
        assert_eq!(order.total_cost, 99.0);
    }

    #[test]
    fn create_rejects_non_positive_quantity() {
        for quantity in [0, -5] {
            let payload = NewOrder {
                quantity,
                ..metformin_order()
            };
            let err = Order::create(OrderId::new(), payload, Utc::now()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn forward_transitions_are_legal() {
        let mut order = Order::create(OrderId::new(), metformin_order(), Utc::now()).unwrap();

        assert!(order.transition_to(OrderStatus::Confirmed).unwrap());
        assert!(order.transition_to(OrderStatus::Shipped).unwrap());
        assert!(order.transition_to(OrderStatus::Delivered).unwrap());
        assert!(order.status.is_terminal());
    }

    #[test]
    fn forward_skips_are_legal() {
        let mut order = Order::create(OrderId::new(), metformin_order(), Utc::now()).unwrap();
        assert!(order.transition_to(OrderStatus::Delivered).unwrap());
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn same_status_update_is_idempotent() {
        let mut order = Order::create(OrderId::new(), metformin_order(), Utc::now()).unwrap();
        order.transition_to(OrderStatus::Confirmed).unwrap();

        let changed = order.transition_to(OrderStatus::Confirmed).unwrap();
        assert!(!changed);
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[test]
    fn regressions_are_rejected() {
        let mut order = Order::create(OrderId::new(), metformin_order(), Utc::now()).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        let err = order.transition_to(OrderStatus::Pending).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"delivered\"").unwrap(),
            OrderStatus::Delivered
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Pending),
                Just(OrderStatus::Confirmed),
                Just(OrderStatus::Shipped),
                Just(OrderStatus::Delivered),
            ]
        }

        proptest! {
            /// Property: a legal transition never lowers the status rank,
            /// and an illegal one leaves the order untouched.
            #[test]
            fn transitions_are_monotonic(from in any_status(), to in any_status()) {
                let mut order =
                    Order::create(OrderId::new(), metformin_order(), Utc::now()).unwrap();
                order.status = from;

                match order.transition_to(to) {
                    Ok(_) => prop_assert_eq!(order.status, to),
                    Err(_) => prop_assert_eq!(order.status, from),
                }
                prop_assert!(order.status.can_advance_to(order.status));
            }
        }
    }
}
