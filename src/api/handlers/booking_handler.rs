//! Booking handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Booking, BookingResponse, BookingStatus};
use crate::errors::{AppError, AppResult};

/// Booking creation request. The client is the authenticated caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Service being booked
    pub service_id: Uuid,
    /// Requested date and time (must not be in the past)
    pub booking_date: DateTime<Utc>,
}

/// Status transition request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransitionRequest {
    /// Target status
    pub status: BookingStatus,
}

/// Create booking routes (all require authentication)
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_booking))
        .route("/me", get(list_own_bookings))
        .route("/provider", get(list_provider_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/status", patch(transition_booking))
}

/// Book a service as the authenticated client
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Past booking date or wrong account kind"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .booking_service
        .create_booking(current_user.id, payload.service_id, payload.booking_date)
        .await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// Bookings made by the authenticated client
#[utoipa::path(
    get,
    path = "/bookings/me",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Bookings", body = [BookingResponse]))
)]
pub async fn list_own_bookings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .booking_service
        .list_for_client(current_user.id)
        .await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Bookings against the authenticated provider's profile
#[utoipa::path(
    get,
    path = "/bookings/provider",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 404, description = "No provider profile for this user")
    )
)]
pub async fn list_provider_bookings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await?;

    let bookings = state.booking_service.list_for_provider(profile.id).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Get a booking by id (participants only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.booking_service.get_booking(id).await?;
    require_participant(&state, &current_user, &booking).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// Move a booking through its lifecycle (participants only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookingResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn transition_booking(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TransitionRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.booking_service.get_booking(id).await?;
    require_participant(&state, &current_user, &booking).await?;

    let updated = state.booking_service.transition(id, payload.status).await?;

    Ok(Json(BookingResponse::from(updated)))
}

/// A booking is visible to its client and to the provider it targets.
async fn require_participant(
    state: &AppState,
    current_user: &CurrentUser,
    booking: &Booking,
) -> AppResult<()> {
    if booking.client_id == current_user.id {
        return Ok(());
    }

    if let Ok(profile) = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await
    {
        if booking.service_provider_id == profile.id {
            return Ok(());
        }
    }

    Err(AppError::Forbidden)
}
