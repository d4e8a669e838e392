//! Session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use siwes_core::guard::{authorize, Access, DenyReason, DEFAULT_REDIRECT};
use siwes_core::identity::Identity;
use siwes_core::roles::Role;

use crate::error::AppError;
use crate::state::AppState;

const PORTAL_ROLES: &[Role] = &[Role::Student, Role::Supervisor, Role::Coordinator];

/// The identity signed in to the portal session.
///
/// Rejects anonymous sessions with 401 and identities without a portal
/// role with 403. Both carry a `redirect_to` hint.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id(), role = %user.role(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    /// Run the route guard for `allowed_roles` against the current session.
    pub fn require(state: &AppState, allowed_roles: &[Role]) -> Result<Self, AppError> {
        let session = state.session.session();
        match authorize(&session, allowed_roles, DEFAULT_REDIRECT) {
            Access::Deny {
                redirect_to,
                reason,
            } => Err(AppError::Denied {
                reason,
                redirect_to,
            }),
            Access::Grant => session
                .identity
                .map(|identity| AuthUser { identity })
                .ok_or_else(|| AppError::Denied {
                    reason: DenyReason::Unauthenticated,
                    redirect_to: DEFAULT_REDIRECT.to_string(),
                }),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::require(state, PORTAL_ROLES)
    }
}
