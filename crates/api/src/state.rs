use std::sync::Arc;

use taskflow_db::EntityStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store is a pool handle and the config sits behind
/// an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub store: EntityStore,
    /// Server configuration (token secret, bind address, CORS origins).
    pub config: Arc<ServerConfig>,
}
