//! The pharmacy order lifecycle store.

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use rxstock_core::{DomainError, DomainResult, ItemId, OrderId, SupplierId};
use rxstock_inventory::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use rxstock_ordering::{NewOrder, Order, OrderStatus};
use rxstock_pricing::{QuoteProvider, SupplierQuote};
use rxstock_suppliers::{NewSupplier, Supplier};

use crate::scheduler::ConfirmationScheduler;
use crate::snapshot::{self, SnapshotError, StoreSnapshot, SCHEMA_VERSION};

/// Store tuning knobs.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Delay between order creation and the automatic `Pending` → `Confirmed`
    /// transition, simulating supplier acknowledgment.
    pub confirmation_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    inventory: Vec<InventoryItem>,
    /// Newest-first: `create_order` prepends.
    orders: Vec<Order>,
    suppliers: Vec<Supplier>,
}

/// Single source of truth for inventory, suppliers, and purchase orders.
///
/// All collections are exclusively owned by the store; callers mutate only
/// through these operations, every one of which reports not-found and
/// validation outcomes instead of swallowing them. Reads return cloned
/// snapshots valid for the duration of one render/request cycle.
pub struct PharmacyStore {
    state: RwLock<StoreState>,
    scheduler: ConfirmationScheduler,
    quote_provider: Arc<dyn QuoteProvider>,
    config: StoreConfig,
}

impl PharmacyStore {
    pub fn new(quote_provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_config(quote_provider, StoreConfig::default())
    }

    pub fn with_config(quote_provider: Arc<dyn QuoteProvider>, config: StoreConfig) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            scheduler: ConfirmationScheduler::new(),
            quote_provider,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- inventory ----

    /// Add an item, assigning a fresh id.
    ///
    /// No duplicate-name check; negative initial stock is accepted.
    pub fn add_inventory_item(&self, payload: NewInventoryItem) -> DomainResult<InventoryItem> {
        let item = InventoryItem::new(ItemId::new(), payload)?;

        let mut state = self.state.write().unwrap();
        state.inventory.push(item.clone());
        debug!(item_id = %item.id, name = %item.name, "inventory item added");
        Ok(item)
    }

    /// Merge set fields of `patch` into the matching item.
    pub fn update_inventory_item(
        &self,
        id: ItemId,
        patch: InventoryItemPatch,
    ) -> DomainResult<InventoryItem> {
        let mut state = self.state.write().unwrap();
        let item = state
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound)?;
        patch.apply(item)?;
        Ok(item.clone())
    }

    /// Overwrite the stock level directly.
    ///
    /// Any integer is accepted, including negative values (no clamping).
    pub fn set_stock(&self, id: ItemId, stock: i64) -> DomainResult<i64> {
        let mut state = self.state.write().unwrap();
        let item = state
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound)?;
        item.stock = stock;
        debug!(item_id = %id, stock, "stock level set");
        Ok(stock)
    }

    pub fn get_inventory_item(&self, id: ItemId) -> Option<InventoryItem> {
        let state = self.state.read().unwrap();
        state.inventory.iter().find(|i| i.id == id).cloned()
    }

    pub fn list_inventory(&self) -> Vec<InventoryItem> {
        self.state.read().unwrap().inventory.clone()
    }

    /// Items whose stock has dropped below their reorder threshold.
    pub fn reorder_needed(&self) -> Vec<InventoryItem> {
        let state = self.state.read().unwrap();
        state
            .inventory
            .iter()
            .filter(|i| i.needs_reorder())
            .cloned()
            .collect()
    }

    // ---- suppliers ----

    pub fn add_supplier(&self, payload: NewSupplier) -> DomainResult<Supplier> {
        let supplier = Supplier::new(SupplierId::new(), payload)?;
        let mut state = self.state.write().unwrap();
        state.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    pub fn get_supplier(&self, id: SupplierId) -> Option<Supplier> {
        let state = self.state.read().unwrap();
        state.suppliers.iter().find(|s| s.id == id).cloned()
    }

    pub fn list_suppliers(&self) -> Vec<Supplier> {
        self.state.read().unwrap().suppliers.clone()
    }

    // ---- quotes ----

    /// One quote per registered supplier for `item_name`, cheapest first.
    ///
    /// Side-effect-free apart from the provider's randomness; nothing is
    /// persisted.
    pub fn quotes(&self, item_name: &str) -> Vec<SupplierQuote> {
        let suppliers = self.list_suppliers();
        let mut quotes = self.quote_provider.quotes(item_name, &suppliers);
        quotes.sort_by(|a, b| a.price.total_cmp(&b.price));
        quotes
    }

    // ---- orders ----

    /// Create an order in `Pending` and schedule its deferred confirmation.
    ///
    /// The order is prepended (newest-first guaranteed) and `total_cost` is
    /// taken verbatim from the payload. Exactly `confirmation_delay` later
    /// the order moves to `Confirmed`, unless its status was changed
    /// externally first, which cancels the schedule.
    pub fn create_order(&self, payload: NewOrder) -> DomainResult<Order> {
        let now = Utc::now();
        let order = Order::create(OrderId::new(), payload, now)?;

        let due_at = now
            + chrono::Duration::from_std(self.config.confirmation_delay).unwrap_or_default();

        {
            let mut state = self.state.write().unwrap();
            state.orders.insert(0, order.clone());
        }
        self.scheduler.schedule(order.id, due_at);

        info!(
            order_id = %order.id,
            item = %order.item_name,
            quantity = order.quantity,
            %due_at,
            "order created; confirmation scheduled"
        );
        Ok(order)
    }

    /// Direct status update.
    ///
    /// Forward-only: same-status updates are idempotent no-ops, regressions
    /// are rejected. Moving an order out of `Pending` cancels its scheduled
    /// confirmation so the timer can never stomp a manual update.
    pub fn update_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<Order> {
        let mut state = self.state.write().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound)?;

        let was_pending = order.status == OrderStatus::Pending;
        let changed = order.transition_to(status)?;
        let updated = order.clone();
        drop(state);

        if changed && was_pending {
            if self.scheduler.cancel(id) {
                debug!(order_id = %id, ?status, "scheduled confirmation cancelled by manual update");
            }
        }
        Ok(updated)
    }

    pub fn get_order(&self, id: OrderId) -> Option<Order> {
        let state = self.state.read().unwrap();
        state.orders.iter().find(|o| o.id == id).cloned()
    }

    /// All orders, newest first.
    pub fn list_orders(&self) -> Vec<Order> {
        self.state.read().unwrap().orders.clone()
    }

    /// Apply every confirmation due at or before `now`.
    ///
    /// Guarded: an order is only touched if it is still `Pending`; anything
    /// else means a manual update won the race and the entry is dropped.
    /// Returns the ids that were confirmed. The background worker calls this
    /// on a poll interval; tests can call it directly with a chosen `now`.
    pub fn process_due_confirmations(&self, now: DateTime<Utc>) -> Vec<OrderId> {
        let due = self.scheduler.take_due(now);
        if due.is_empty() {
            return Vec::new();
        }

        let mut confirmed = Vec::new();
        let mut state = self.state.write().unwrap();
        for id in due {
            match state.orders.iter_mut().find(|o| o.id == id) {
                Some(order) if order.status == OrderStatus::Pending => {
                    order.status = OrderStatus::Confirmed;
                    info!(order_id = %id, "order confirmed by supplier acknowledgment");
                    confirmed.push(id);
                }
                Some(order) => {
                    debug!(
                        order_id = %id,
                        status = ?order.status,
                        "due confirmation skipped; order no longer pending"
                    );
                }
                None => {
                    warn!(order_id = %id, "due confirmation for unknown order dropped");
                }
            }
        }
        confirmed
    }

    /// Number of confirmations still scheduled.
    pub fn pending_confirmations(&self) -> usize {
        self.scheduler.len()
    }

    // ---- snapshot boundary ----

    /// Clone the entire state into one versioned document.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().unwrap();
        StoreSnapshot {
            schema_version: SCHEMA_VERSION,
            inventory: state.inventory.clone(),
            orders: state.orders.clone(),
            suppliers: state.suppliers.clone(),
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// Orders still `Pending` are re-scheduled with the full confirmation
    /// delay from now; wall-clock deadlines are not persisted.
    pub fn from_snapshot(
        snapshot: StoreSnapshot,
        quote_provider: Arc<dyn QuoteProvider>,
        config: StoreConfig,
    ) -> Result<Self, SnapshotError> {
        snapshot.check_version()?;

        let store = Self::with_config(quote_provider, config);
        let due_at = Utc::now()
            + chrono::Duration::from_std(store.config.confirmation_delay).unwrap_or_default();

        {
            let mut state = store.state.write().unwrap();
            state.inventory = snapshot.inventory;
            state.suppliers = snapshot.suppliers;
            state.orders = snapshot.orders;

            for order in state.orders.iter().filter(|o| o.status == OrderStatus::Pending) {
                store.scheduler.schedule(order.id, due_at);
            }
        }
        Ok(store)
    }

    /// Persist the current state to `path` as one JSON document.
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        snapshot::write_snapshot(path, &self.snapshot())
    }

    /// Load a store from a snapshot file.
    pub fn load_from(
        path: &Path,
        quote_provider: Arc<dyn QuoteProvider>,
        config: StoreConfig,
    ) -> Result<Self, SnapshotError> {
        let snapshot = snapshot::read_snapshot(path)?;
        Self::from_snapshot(snapshot, quote_provider, config)
    }
}
