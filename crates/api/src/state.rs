use std::sync::Arc;

use qrcodes_core::store::{CatalogLookup, RecordStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// QR code persistence.
    pub records: Arc<dyn RecordStore>,
    /// Product catalog used to enrich listing rows.
    pub catalog: Arc<dyn CatalogLookup>,
    /// Server configuration (session secrets, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}
