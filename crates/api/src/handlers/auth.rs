//! Handlers for the `/auth` resource (login, signup, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use siwes_core::identity::Identity;
use siwes_core::roles::Role;
use siwes_db::repositories::IdentityRepo;
use siwes_identity::{Profile, ProviderError};
use siwes_session::publish_sign_in;
use validator::Validate;

use crate::auth::AuthBackend;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// `role` is the portal the user is signing in to (student, supervisor or
/// coordinator login page); when set, the identity must have that role.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Student ID is required"))]
    pub student_id: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Successful login: the signed-in identity and where to send them.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Identity,
    pub redirect_to: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// In provider mode the sign-in is fenced with a session ticket and applied
/// by the session listener; the response is sent once the session holds the
/// new identity.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input.validate()?;

    let identity = match state.auth.as_ref() {
        AuthBackend::Demo(directory) => {
            let identity = directory
                .authenticate(&state.store, &input.email, &input.password, input.role)
                .await?;
            state.session.login(identity.clone());
            identity
        }
        AuthBackend::Provider { provider, events } => {
            let ticket = state.session.begin_sign_in();
            let signed_in = provider.sign_in(&input.email, &input.password).await?;
            let identity = publish_sign_in(events, &signed_in.user_id, ticket).await?;

            if input.role.is_some_and(|role| role != identity.role) {
                tracing::info!(user_id = %identity.id, role = %identity.role, "Login rejected for wrong portal");
                state.session.logout().await;
                return Err(AppError::Provider(ProviderError::InvalidCredentials(
                    "Invalid email or password".into(),
                )));
            }

            // Keep the portal data in step with the provider profile.
            IdentityRepo::upsert(&state.store, identity.clone()).await
        }
    };

    tracing::info!(user_id = %identity.id, role = %identity.role, mode = state.auth.mode(), "Login successful");
    Ok(Json(DataResponse {
        data: LoginResponse {
            redirect_to: identity.role.dashboard_path(),
            user: identity,
        },
    }))
}

/// POST /api/v1/auth/signup
///
/// Register a student account at the identity provider and create its
/// profile. Does not sign the new student in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Identity>>)> {
    input.validate()?;

    let AuthBackend::Provider { provider, .. } = state.auth.as_ref() else {
        return Err(AppError::Provider(ProviderError::ConfigurationMissing));
    };

    let email = input.email.trim();
    let user_id = provider.sign_up(email, &input.password).await?;
    let profile = Profile::new_student(user_id, input.name.trim(), email, input.student_id.trim());
    provider.create_profile(&profile).await?;

    let identity = IdentityRepo::upsert(&state.store, profile.into_identity()).await;
    tracing::info!(user_id = %identity.id, "Student registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: identity })))
}

/// POST /api/v1/auth/logout
///
/// Clear the session. Succeeds whether or not anyone is signed in, and
/// regardless of the provider's answer. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}
