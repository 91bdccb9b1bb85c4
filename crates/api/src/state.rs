use std::sync::Arc;

use inkwell_db::DocumentStore;

use crate::config::ServerConfig;
use crate::service::DocumentService;
use crate::ws::{CollabRelay, WsManager};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Document operations; the only path that mutates stored documents.
    pub documents: DocumentService,
    /// Live WebSocket connections (heartbeat and shutdown).
    pub ws_manager: Arc<WsManager>,
    /// Per-document broadcast groups.
    pub relay: Arc<CollabRelay>,
}

impl AppState {
    /// Assemble state around a document store with fresh connection registries.
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            documents: DocumentService::new(store),
            ws_manager: Arc::new(WsManager::new()),
            relay: Arc::new(CollabRelay::new()),
        }
    }
}
