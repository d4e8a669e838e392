//! Route definitions for the `/supervisor` portal.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::supervisor;
use crate::state::AppState;

/// Routes mounted at `/supervisor`.
///
/// ```text
/// GET  /dashboard              -> dashboard
/// POST /reports/{id}/review    -> review_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(supervisor::dashboard))
        .route("/reports/{id}/review", post(supervisor::review_report))
}
