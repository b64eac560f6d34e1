use std::sync::Arc;

use loyalty_events::{EventBus, NotificationEmitter};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: loyalty_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// In-process bus; the delivery worker subscribes to it.
    pub event_bus: Arc<EventBus>,
    /// Best-effort notification writer used by the settlement engine.
    pub emitter: NotificationEmitter,
}

impl AppState {
    pub fn new(pool: loyalty_db::DbPool, config: ServerConfig, event_bus: Arc<EventBus>) -> Self {
        let emitter = NotificationEmitter::new(pool.clone(), Arc::clone(&event_bus));
        Self {
            pool,
            config: Arc::new(config),
            event_bus,
            emitter,
        }
    }
}
