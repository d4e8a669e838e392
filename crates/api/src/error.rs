use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use siwes_core::error::CoreError;
use siwes_core::guard::DenyReason;
use siwes_identity::ProviderError;
use siwes_session::SessionError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, provider and session errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `siwes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The identity provider refused or failed a request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A sign-in could not be applied to the session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The route guard denied access.
    #[error("Access denied ({reason:?}), redirect to {redirect_to}")]
    Denied {
        reason: DenyReason,
        redirect_to: String,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

fn internal(code: &'static str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal("INTERNAL_ERROR")
                }
            },

            // --- Identity provider ---
            AppError::Provider(err) => match err {
                ProviderError::ConfigurationMissing => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_MISSING",
                    err.to_string(),
                ),
                ProviderError::InvalidCredentials(msg) => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", msg.clone())
                }
                ProviderError::SignUpRejected(msg) => {
                    (StatusCode::BAD_REQUEST, "SIGN_UP_REJECTED", msg.clone())
                }
                ProviderError::ProfileLookupFailed(msg) => {
                    tracing::error!(error = %msg, "Profile lookup failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROFILE_LOOKUP_FAILED",
                        "Could not load the user profile".to_string(),
                    )
                }
                ProviderError::NetworkUnavailable(e) => {
                    tracing::error!(error = %e, "Identity provider unreachable");
                    (
                        StatusCode::BAD_GATEWAY,
                        "NETWORK_UNAVAILABLE",
                        "The identity provider is unreachable".to_string(),
                    )
                }
                ProviderError::Api { status, body } => {
                    tracing::error!(status, body = %body, "Identity provider error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_ERROR",
                        "The identity provider returned an error".to_string(),
                    )
                }
            },

            // --- Session ---
            AppError::Session(err) => match err {
                SessionError::Stale => (StatusCode::CONFLICT, "SIGN_IN_SUPERSEDED", err.to_string()),
                SessionError::ProfileLookupFailed(msg) => {
                    tracing::error!(error = %msg, "Profile lookup failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROFILE_LOOKUP_FAILED",
                        "Could not load the user profile".to_string(),
                    )
                }
                SessionError::ListenerClosed => {
                    tracing::error!("Session listener is not running");
                    internal("SESSION_UNAVAILABLE")
                }
            },

            // --- Route guard ---
            AppError::Denied { reason, .. } => match reason {
                DenyReason::Unauthenticated => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    "Sign in to continue".to_string(),
                ),
                DenyReason::RoleNotAllowed => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "Your role cannot access this page".to_string(),
                ),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal("INTERNAL_ERROR")
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::Denied { redirect_to, .. } = &self {
            body["redirect_to"] = json!(redirect_to);
        }

        (status, axum::Json(body)).into_response()
    }
}
