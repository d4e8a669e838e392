//! Route definitions for messages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET  /messages              -> list
/// POST /messages              -> send
/// POST /messages/{id}/read    -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::list).post(messages::send))
        .route("/messages/{id}/read", post(messages::mark_read))
}
