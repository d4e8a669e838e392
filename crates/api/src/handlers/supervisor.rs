//! Handlers for the supervisor portal.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use siwes_core::dashboard::SupervisorSummary;
use siwes_core::error::CoreError;
use siwes_core::report::Report;
use siwes_db::repositories::{AssignmentRepo, DashboardRepo, ReportRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireSupervisor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /supervisor/reports/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub feedback: String,
}

/// GET /api/v1/supervisor/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireSupervisor(user): RequireSupervisor,
) -> Json<DataResponse<SupervisorSummary>> {
    let summary = DashboardRepo::supervisor(&state.store, user.id()).await;
    Json(DataResponse { data: summary })
}

/// POST /api/v1/supervisor/reports/{id}/review
///
/// Only reports of students assigned to the supervisor can be reviewed.
pub async fn review_report(
    State(state): State<AppState>,
    RequireSupervisor(user): RequireSupervisor,
    Path(report_id): Path<String>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = ReportRepo::find_by_id(&state.store, &report_id)
        .await
        .ok_or_else(|| CoreError::not_found("Report", report_id.clone()))?;

    if !AssignmentRepo::is_assigned(&state.store, user.id(), &report.student_id).await {
        return Err(CoreError::Forbidden(
            "You can only review reports of students assigned to you".into(),
        )
        .into());
    }

    let report = ReportRepo::review(&state.store, &report_id, &input.feedback).await?;
    tracing::info!(supervisor_id = %user.id(), report_id = %report.id, "Report reviewed");
    Ok(Json(DataResponse { data: report }))
}
