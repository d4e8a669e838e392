//! Route definitions for the `/coordinator` portal.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::coordinator;
use crate::state::AppState;

/// Routes mounted at `/coordinator`.
///
/// ```text
/// GET  /dashboard                        -> dashboard
/// GET  /organizations                    -> organizations
/// POST /payments/{student_id}/verify     -> verify_payment
/// POST /payments/{student_id}/reject     -> reject_payment
/// POST /assignments                      -> assign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(coordinator::dashboard))
        .route("/organizations", get(coordinator::organizations))
        .route(
            "/payments/{student_id}/verify",
            post(coordinator::verify_payment),
        )
        .route(
            "/payments/{student_id}/reject",
            post(coordinator::reject_payment),
        )
        .route("/assignments", post(coordinator::assign))
}
