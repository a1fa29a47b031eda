//! Application state.

use std::sync::Arc;

use spato_ledger_store::RocksStore;

use crate::config::ServiceConfig;
use crate::ledger::Ledger;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// The ledger service wrapping the store.
    pub ledger: Ledger,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        if config.auth_secret.is_none() {
            tracing::warn!("AUTH_SECRET not configured - accepting dev tokens only");
        }

        let ledger = Ledger::new(Arc::clone(&store));

        Self {
            store,
            ledger,
            config,
        }
    }
}
