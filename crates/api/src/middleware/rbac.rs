//! Role-based access control (RBAC) extractors.
//!
//! Each extractor runs the route guard for a single role and rejects the
//! request with the guard's decision otherwise. Use these in route handlers
//! to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use siwes_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `student` role.
///
/// ```ignore
/// async fn student_only(RequireStudent(user): RequireStudent) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::require(state, &[Role::Student]).map(RequireStudent)
    }
}

/// Requires the `supervisor` role.
pub struct RequireSupervisor(pub AuthUser);

impl FromRequestParts<AppState> for RequireSupervisor {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::require(state, &[Role::Supervisor]).map(RequireSupervisor)
    }
}

/// Requires the `coordinator` role.
pub struct RequireCoordinator(pub AuthUser);

impl FromRequestParts<AppState> for RequireCoordinator {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::require(state, &[Role::Coordinator]).map(RequireCoordinator)
    }
}
