//! Application state for Axum web framework.

use crate::config::NotifyConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared state handed to every handler.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct pool access for the health check
    pub db_pool: AsyncDbPool,
    pub notify: NotifyConfig,
}

impl AppState {
    /// Wires repositories and services on top of `pool`.
    pub fn new(pool: AsyncDbPool, notify: NotifyConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, &notify);
        Self {
            services,
            db_pool: pool,
            notify,
        }
    }
}
