//! Service wiring: stores, snapshot loading, and the confirmation worker.

use std::path::PathBuf;
use std::sync::Arc;

use rxstock_pricing::SimulatedQuoteProvider;
use rxstock_prescriptions::{PrescriptionStore, StoreTokenVerifier, TokenVerifier};
use rxstock_store::{
    ConfirmationWorkerConfig, ConfirmationWorkerHandle, PharmacyStore, StoreConfig,
};

use crate::config::AppConfig;

/// Everything the handlers need, shared via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub store: Arc<PharmacyStore>,
    pub prescriptions: Arc<PrescriptionStore>,
    pub verifier: Box<dyn TokenVerifier>,
    pub snapshot_path: Option<PathBuf>,
    // Dropping the handle closes the shutdown channel and stops the worker,
    // so it lives exactly as long as the services do.
    _worker: ConfirmationWorkerHandle,
}

/// Wire up the stores and start the confirmation worker.
///
/// If a snapshot path is configured and the file exists, state is restored
/// from it; a corrupt or unreadable snapshot is a startup failure rather than
/// a silent reset.
pub fn build_services(config: &AppConfig) -> AppServices {
    let quote_provider = Arc::new(SimulatedQuoteProvider::new());
    let store_config = StoreConfig {
        confirmation_delay: config.confirmation_delay,
    };

    let store = match &config.snapshot_path {
        Some(path) if path.exists() => {
            let store = PharmacyStore::load_from(path, quote_provider, store_config)
                .unwrap_or_else(|e| panic!("failed to load snapshot {}: {e}", path.display()));
            tracing::info!(path = %path.display(), "restored state from snapshot");
            store
        }
        _ => PharmacyStore::with_config(quote_provider, store_config),
    };
    let store = Arc::new(store);

    let prescriptions = Arc::new(PrescriptionStore::new());
    let verifier: Box<dyn TokenVerifier> =
        Box::new(StoreTokenVerifier::new(prescriptions.clone()));

    let worker = rxstock_store::worker::spawn(store.clone(), ConfirmationWorkerConfig::default());

    AppServices {
        store,
        prescriptions,
        verifier,
        snapshot_path: config.snapshot_path.clone(),
        _worker: worker,
    }
}
