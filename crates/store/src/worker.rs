//! Background worker driving deferred confirmations.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::store::PharmacyStore;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct ConfirmationWorkerConfig {
    /// How often to check for due confirmations.
    pub poll_interval: Duration,
    /// Thread name for logging.
    pub name: String,
}

impl Default for ConfirmationWorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            name: "confirmation-worker".to_string(),
        }
    }
}

/// Handle to control a running confirmation worker.
#[derive(Debug)]
pub struct ConfirmationWorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl ConfirmationWorkerHandle {
    /// Request graceful shutdown and wait for the worker to exit.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Spawn a thread that drains due confirmations on a poll interval.
///
/// Mutations stay serialized through the store's own locking; the worker is
/// just a clock.
pub fn spawn(
    store: Arc<PharmacyStore>,
    config: ConfirmationWorkerConfig,
) -> ConfirmationWorkerHandle {
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let name = config.name.clone();
    let join = thread::Builder::new()
        .name(name.clone())
        .spawn(move || {
            worker_loop(store, config, shutdown_rx);
        })
        .expect("failed to spawn confirmation worker thread");

    ConfirmationWorkerHandle {
        shutdown: shutdown_tx,
        join: Some(join),
    }
}

fn worker_loop(
    store: Arc<PharmacyStore>,
    config: ConfirmationWorkerConfig,
    shutdown_rx: mpsc::Receiver<()>,
) {
    info!(worker = %config.name, "confirmation worker started");

    loop {
        // recv_timeout doubles as the poll sleep and the shutdown check.
        match shutdown_rx.recv_timeout(config.poll_interval) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        let confirmed = store.process_due_confirmations(Utc::now());
        if !confirmed.is_empty() {
            debug!(
                worker = %config.name,
                count = confirmed.len(),
                "confirmed due orders"
            );
        }
    }

    info!(worker = %config.name, "confirmation worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use rxstock_inventory::NewInventoryItem;
    use rxstock_ordering::{NewOrder, OrderStatus};
    use rxstock_pricing::SimulatedQuoteProvider;
    use rxstock_suppliers::NewSupplier;

    fn fast_store() -> Arc<PharmacyStore> {
        Arc::new(PharmacyStore::with_config(
            Arc::new(SimulatedQuoteProvider::seeded(3)),
            StoreConfig {
                confirmation_delay: Duration::from_millis(30),
            },
        ))
    }

    fn place_order(store: &PharmacyStore) -> rxstock_ordering::Order {
        let item = store
            .add_inventory_item(NewInventoryItem {
                name: "Aspirin 100mg".to_string(),
                generic_name: "Aspirin".to_string(),
                stock: 10,
                min_stock: 20,
                unit: "tablet".to_string(),
                unit_price: 0.05,
                category: "Analgesics".to_string(),
            })
            .unwrap();
        let supplier = store
            .add_supplier(NewSupplier {
                name: "MedSupply Direct".to_string(),
                rating: 4.6,
                delivery_time: "2-3 days".to_string(),
            })
            .unwrap();

        store
            .create_order(NewOrder {
                item_id: item.id,
                item_name: item.generic_name.clone(),
                quantity: 100,
                supplier_id: supplier.id,
                supplier_name: supplier.name.clone(),
                unit_price: 0.04,
                total_cost: 4.0,
                estimated_delivery: supplier.delivery_time.clone(),
            })
            .unwrap()
    }

    #[test]
    fn worker_confirms_pending_order_after_delay() {
        let store = fast_store();
        let order = place_order(&store);
        assert_eq!(store.get_order(order.id).unwrap().status, OrderStatus::Pending);

        let handle = spawn(
            store.clone(),
            ConfirmationWorkerConfig {
                poll_interval: Duration::from_millis(10),
                ..Default::default()
            },
        );

        // 30ms delay + 10ms poll, with generous headroom.
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        loop {
            if store.get_order(order.id).unwrap().status == OrderStatus::Confirmed {
                break;
            }
            assert!(
                std::time::Instant::now() < deadline,
                "order was never confirmed"
            );
            thread::sleep(Duration::from_millis(10));
        }

        handle.shutdown();
    }

    #[test]
    fn worker_leaves_manually_updated_order_alone() {
        let store = fast_store();
        let order = place_order(&store);
        store
            .update_order_status(order.id, OrderStatus::Shipped)
            .unwrap();

        let handle = spawn(
            store.clone(),
            ConfirmationWorkerConfig {
                poll_interval: Duration::from_millis(10),
                ..Default::default()
            },
        );
        thread::sleep(Duration::from_millis(200));
        handle.shutdown();

        assert_eq!(store.get_order(order.id).unwrap().status, OrderStatus::Shipped);
    }

    #[test]
    fn shutdown_stops_the_worker() {
        let store = fast_store();
        let handle = spawn(store, ConfirmationWorkerConfig::default());
        // Returns promptly rather than hanging on the join.
        handle.shutdown();
    }
}
