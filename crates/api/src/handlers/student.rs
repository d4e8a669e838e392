//! Handlers for the student portal: dashboard, weekly reports, payment and
//! the SIWES letter. All endpoints require the student role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use siwes_core::dashboard::StudentSummary;
use siwes_core::identity::{Identity, IdentityUpdate, PaymentStatus};
use siwes_core::payment::{issue_letter, status_after_payment, PaymentMethod, SiwesLetter, SIWES_FEE_NAIRA};
use siwes_core::report::{NewReport, Report};
use siwes_db::repositories::{DashboardRepo, IdentityRepo, OrganizationRepo, ReportRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `POST /student/payment`.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub payment_status: PaymentStatus,
    pub fee_naira: u32,
}

/// The student's portal record, falling back to the session identity when
/// the record is missing from the data store.
async fn student_record(state: &AppState, user: &AuthUser) -> Identity {
    IdentityRepo::find_by_id(&state.store, user.id())
        .await
        .unwrap_or_else(|| user.identity.clone())
}

/// GET /api/v1/student/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> Json<DataResponse<StudentSummary>> {
    let student = student_record(&state, &user).await;
    let summary = DashboardRepo::student(&state.store, &student).await;
    Json(DataResponse { data: summary })
}

/// GET /api/v1/student/reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> Json<DataResponse<Vec<Report>>> {
    let reports = ReportRepo::list_for_student(&state.store, user.id()).await;
    Json(DataResponse { data: reports })
}

/// POST /api/v1/student/reports
pub async fn submit_report(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Json(input): Json<NewReport>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    let report = Report::submit(user.id(), input, Utc::now().date_naive())?;
    let report = ReportRepo::create(&state.store, report).await;
    tracing::info!(student_id = %user.id(), report_id = %report.id, week = report.week, "Report submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// POST /api/v1/student/payment
///
/// `{"method": "online"}` verifies immediately; `{"method": "evidence",
/// "reference": "..."}` waits for a coordinator.
pub async fn pay(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Json(method): Json<PaymentMethod>,
) -> AppResult<Json<DataResponse<PaymentResponse>>> {
    let student = student_record(&state, &user).await;
    let payment_status = status_after_payment(student.payment_status, &method)?;

    let update = IdentityUpdate::payment(payment_status);
    state.session.update_identity(&update);
    IdentityRepo::update(&state.store, user.id(), &update).await;
    tracing::info!(student_id = %user.id(), status = payment_status.as_str(), "Payment recorded");

    Ok(Json(DataResponse {
        data: PaymentResponse {
            payment_status,
            fee_naira: SIWES_FEE_NAIRA,
        },
    }))
}

/// GET /api/v1/student/letter
///
/// 403 until the payment is verified.
pub async fn letter(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> AppResult<Json<DataResponse<SiwesLetter>>> {
    let student = student_record(&state, &user).await;
    let organization = match student.organization() {
        Some(id) => OrganizationRepo::find_by_id(&state.store, id).await,
        None => None,
    };
    let letter = issue_letter(&student, organization.as_ref())?;
    Ok(Json(DataResponse { data: letter }))
}
