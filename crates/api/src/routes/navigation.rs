//! Route definitions for the session snapshot and navigation surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /session                 -> current_session
/// GET /navigation              -> navigation
/// GET /navigation/authorize    -> authorize_path
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(session::current_session))
        .route("/navigation", get(session::navigation))
        .route("/navigation/authorize", get(session::authorize_path))
}
