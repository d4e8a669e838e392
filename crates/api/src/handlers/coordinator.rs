//! Handlers for the coordinator portal: programme-wide statistics,
//! organizations, payment verification and supervisor assignment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use siwes_core::assignment::Assignment;
use siwes_core::dashboard::CoordinatorSummary;
use siwes_core::error::CoreError;
use siwes_core::identity::{Identity, IdentityUpdate};
use siwes_core::organization::Organization;
use siwes_core::payment::{apply_decision, PaymentDecision};
use siwes_db::repositories::{AssignmentRepo, DashboardRepo, IdentityRepo, OrganizationRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireCoordinator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /coordinator/assignments`.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub supervisor_id: String,
    pub student_id: String,
}

/// GET /api/v1/coordinator/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireCoordinator(_user): RequireCoordinator,
) -> Json<DataResponse<CoordinatorSummary>> {
    let summary = DashboardRepo::coordinator(&state.store).await;
    Json(DataResponse { data: summary })
}

/// GET /api/v1/coordinator/organizations
pub async fn organizations(
    State(state): State<AppState>,
    RequireCoordinator(_user): RequireCoordinator,
) -> Json<DataResponse<Vec<Organization>>> {
    let organizations = OrganizationRepo::list(&state.store).await;
    Json(DataResponse {
        data: organizations,
    })
}

/// POST /api/v1/coordinator/payments/{student_id}/verify
pub async fn verify_payment(
    state: State<AppState>,
    coordinator: RequireCoordinator,
    student_id: Path<String>,
) -> AppResult<Json<DataResponse<Identity>>> {
    decide_payment(state, coordinator, student_id, PaymentDecision::Verify).await
}

/// POST /api/v1/coordinator/payments/{student_id}/reject
pub async fn reject_payment(
    state: State<AppState>,
    coordinator: RequireCoordinator,
    student_id: Path<String>,
) -> AppResult<Json<DataResponse<Identity>>> {
    decide_payment(state, coordinator, student_id, PaymentDecision::Reject).await
}

async fn decide_payment(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(student_id): Path<String>,
    decision: PaymentDecision,
) -> AppResult<Json<DataResponse<Identity>>> {
    let student = IdentityRepo::find_by_id(&state.store, &student_id)
        .await
        .filter(Identity::is_student)
        .ok_or_else(|| CoreError::not_found("Student", student_id.clone()))?;

    let status = apply_decision(student.payment_status, decision)?;
    let updated = IdentityRepo::update(&state.store, &student_id, &IdentityUpdate::payment(status))
        .await
        .ok_or_else(|| CoreError::not_found("Student", student_id.clone()))?;

    tracing::info!(
        coordinator_id = %user.id(),
        student_id = %student_id,
        status = status.as_str(),
        "Payment decision recorded"
    );
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/coordinator/assignments
///
/// Assign a student to a supervisor, replacing any previous assignment.
pub async fn assign(
    State(state): State<AppState>,
    RequireCoordinator(_user): RequireCoordinator,
    Json(input): Json<AssignRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Assignment>>)> {
    let assignment =
        AssignmentRepo::assign(&state.store, &input.supervisor_id, &input.student_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}
