use std::sync::Arc;

use siwes_db::DataStore;
use siwes_session::SessionStore;

use crate::auth::AuthBackend;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Portal data (identities, organizations, reports, messages, assignments).
    pub store: DataStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The portal's session.
    pub session: Arc<SessionStore>,
    /// How credentials are checked: demo directory or identity provider.
    pub auth: Arc<AuthBackend>,
}
