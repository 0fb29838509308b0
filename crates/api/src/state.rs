use std::sync::Arc;

use blitz_core::graph_layout::LayoutCache;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: blitz_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Pinned node positions of the outreach graph. The only in-process
    /// mutable state; planner boards are rebuilt per request.
    pub layout_cache: Arc<RwLock<LayoutCache>>,
}

impl AppState {
    pub fn new(pool: blitz_db::DbPool, config: ServerConfig) -> Self {
        let layout_cache = LayoutCache::new(config.layout_cache_capacity);
        Self {
            pool,
            config: Arc::new(config),
            layout_cache: Arc::new(RwLock::new(layout_cache)),
        }
    }
}
