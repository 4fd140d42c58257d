//! Messaging and notification handlers.
//!
//! All reads here are scoped to the authenticated caller; a user id in
//! the payload is only ever a recipient, never the subject of the query.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{MessageResponse, NotificationResponse};
use crate::errors::AppResult;

/// Message send request. The sender is the authenticated caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    /// Receiving user
    pub receiver_id: Uuid,
    /// Message body
    #[validate(length(min = 1, message = "Message content must not be empty"))]
    pub content: String,
}

/// Notification creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NotifyRequest {
    /// Notified user
    pub user_id: Uuid,
    /// Notification text
    #[validate(length(min = 1, message = "Notification content must not be empty"))]
    pub content: String,
}

/// Create message routes (all require authentication)
pub fn message_routes() -> Router<AppState> {
    Router::new().route("/", get(inbox).post(send_message))
}

/// Create notification routes (all require authentication)
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(notify))
        .route("/:id/read", post(mark_notification_read))
}

/// Send a message to another user
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 404, description = "Receiver not found")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let message = state
        .messaging_service
        .send_message(current_user.id, payload.receiver_id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// The authenticated user's inbox, oldest first
#[utoipa::path(
    get,
    path = "/messages",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Received messages", body = [MessageResponse]))
)]
pub async fn inbox(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<MessageResponse>>> {
    let messages = state.messaging_service.inbox(current_user.id).await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Record a notification for a user
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    request_body = NotifyRequest,
    responses(
        (status = 201, description = "Notification recorded", body = NotificationResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn notify(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NotifyRequest>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    let notification = state
        .messaging_service
        .notify(payload.user_id, payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(notification)),
    ))
}

/// The authenticated user's notifications, read and unread
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Notifications", body = [NotificationResponse]))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .messaging_service
        .notifications_for(current_user.id)
        .await?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Mark one of the caller's notifications as read (idempotent)
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification (now read)", body = NotificationResponse),
        (status = 403, description = "Not the notification's owner"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NotificationResponse>> {
    let notification = state
        .messaging_service
        .mark_notification_read(current_user.id, id)
        .await?;

    Ok(Json(NotificationResponse::from(notification)))
}
