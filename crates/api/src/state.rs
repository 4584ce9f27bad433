use std::sync::Arc;

use melist_db::Store;
use melist_marketplace::{IdentityValidator, ItemProvider};

use crate::config::ServerConfig;
use crate::engine::enrichment::ItemEnricher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every collaborator is behind an `Arc`. Production
/// wires PostgreSQL and the marketplace client in `main`; tests substitute
/// in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub items: Arc<dyn ItemProvider>,
    pub identity: Arc<dyn IdentityValidator>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Enricher bounded by the configured concurrency.
    pub fn enricher(&self) -> ItemEnricher {
        ItemEnricher::new(Arc::clone(&self.items), self.config.enrich_concurrency)
    }
}
