//! Handlers for messages between portal users.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use siwes_core::error::CoreError;
use siwes_core::message::Message;
use siwes_db::repositories::{IdentityRepo, MessageRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub content: String,
}

/// Response for `GET /messages`.
#[derive(Debug, Serialize)]
pub struct Inbox {
    pub messages: Vec<Message>,
    pub unread: usize,
}

/// GET /api/v1/messages
///
/// Messages sent or received by the signed-in user, oldest first.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> Json<DataResponse<Inbox>> {
    let messages = MessageRepo::list_for_user(&state.store, user.id()).await;
    let unread = MessageRepo::unread_count(&state.store, user.id()).await;
    Json(DataResponse {
        data: Inbox { messages, unread },
    })
}

/// POST /api/v1/messages
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    if IdentityRepo::find_by_id(&state.store, &input.receiver_id)
        .await
        .is_none()
    {
        return Err(CoreError::not_found("User", input.receiver_id).into());
    }

    let message = Message::compose(user.id(), &input.receiver_id, &input.content, Utc::now())?;
    let message = MessageRepo::create(&state.store, message).await;
    tracing::debug!(message_id = %message.id, sender_id = %user.id(), "Message sent");
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// POST /api/v1/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(message_id): Path<String>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = MessageRepo::mark_read(&state.store, &message_id, user.id()).await?;
    Ok(Json(DataResponse { data: message }))
}
