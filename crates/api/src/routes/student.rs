//! Route definitions for the `/student` portal.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Routes mounted at `/student`.
///
/// ```text
/// GET  /dashboard    -> dashboard
/// GET  /reports      -> list_reports
/// POST /reports      -> submit_report
/// POST /payment      -> pay
/// GET  /letter       -> letter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(student::dashboard))
        .route(
            "/reports",
            get(student::list_reports).post(student::submit_report),
        )
        .route("/payment", post(student::pay))
        .route("/letter", get(student::letter))
}
