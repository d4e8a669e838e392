//! Handlers for the session snapshot and the navigation surface.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use siwes_core::error::CoreError;
use siwes_core::guard::Access;
use siwes_core::identity::Identity;
use siwes_core::navigation::{find_destination, navigation_links, NavLink};
use siwes_core::roles::Role;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `GET /session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub identity: Option<Identity>,
    pub role: Role,
    /// Dashboard path for the current role, if it has one.
    pub dashboard: Option<&'static str>,
    pub auth_mode: &'static str,
}

/// Response for `GET /navigation`.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub role: Role,
    pub links: &'static [NavLink],
}

/// Query params for `GET /navigation/authorize`.
#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    pub path: String,
}

/// Response for `GET /navigation/authorize`.
#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub path: &'static str,
    #[serde(flatten)]
    pub access: Access,
}

/// GET /api/v1/session
pub async fn current_session(State(state): State<AppState>) -> Json<DataResponse<SessionResponse>> {
    let session = state.session.session();
    let role = session.role();
    Json(DataResponse {
        data: SessionResponse {
            authenticated: !session.is_anonymous(),
            identity: session.current().cloned(),
            role,
            dashboard: role.dashboard_path(),
            auth_mode: state.auth.mode(),
        },
    })
}

/// GET /api/v1/navigation
pub async fn navigation(State(state): State<AppState>) -> Json<DataResponse<NavigationResponse>> {
    let role = state.session.session().role();
    Json(DataResponse {
        data: NavigationResponse {
            role,
            links: navigation_links(role),
        },
    })
}

/// GET /api/v1/navigation/authorize?path=/student/dashboard
///
/// Evaluate the route guard for a destination against the current session.
/// Unknown paths are 404.
pub async fn authorize_path(
    State(state): State<AppState>,
    Query(query): Query<AuthorizeQuery>,
) -> AppResult<Json<DataResponse<AuthorizeResponse>>> {
    let destination = find_destination(&query.path)
        .ok_or_else(|| CoreError::not_found("Destination", query.path.clone()))?;

    let access = destination.check(&state.session.session());
    tracing::debug!(path = destination.path, granted = access.is_granted(), "Navigation check");

    Ok(Json(DataResponse {
        data: AuthorizeResponse {
            path: destination.path,
            access,
        },
    }))
}
