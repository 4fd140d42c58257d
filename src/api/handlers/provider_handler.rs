//! Provider profile handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateProviderProfile, ProviderProfileResponse, UpdateProviderProfile};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Provider profile creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    /// Profession exercised by the provider
    #[validate(length(min = 1, message = "Profession is required"))]
    #[schema(example = "Electrician")]
    pub profession: String,
    /// Where the provider operates
    #[validate(length(min = 1, message = "Location is required"))]
    #[schema(example = "Lyon")]
    pub location: String,
    /// Description of the services offered
    #[serde(default)]
    pub description: String,
    /// Years of experience (must not be negative)
    #[serde(default)]
    pub experience: i32,
}

/// Rating recompute request (called by the surrounding system)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetRatingRequest {
    /// New rating value
    #[schema(example = 4.5)]
    pub rating: f64,
}

/// Create provider profile routes (all require authentication)
pub fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route(
            "/me",
            get(get_own_profile).put(update_own_profile).delete(delete_own_profile),
        )
        .route("/:id", get(get_profile))
        .route("/:id/rating", put(set_rating))
}

/// Create a profile for the authenticated provider
#[utoipa::path(
    post,
    path = "/providers",
    tag = "Providers",
    security(("bearer_auth" = [])),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProviderProfileResponse),
        (status = 400, description = "Validation error or wrong account kind"),
        (status = 409, description = "Profile already exists")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<ProviderProfileResponse>)> {
    let profile = state
        .provider_service
        .create_profile(
            current_user.id,
            CreateProviderProfile {
                profession: payload.profession,
                location: payload.location,
                description: payload.description,
                experience: payload.experience,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ProviderProfileResponse::from(profile))))
}

/// List all provider profiles
#[utoipa::path(
    get,
    path = "/providers",
    tag = "Providers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profiles", body = [ProviderProfileResponse])
    )
)]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProviderProfileResponse>>> {
    let profiles = state.provider_service.list_profiles().await?;
    Ok(Json(
        profiles.into_iter().map(ProviderProfileResponse::from).collect(),
    ))
}

/// Get the authenticated provider's profile
#[utoipa::path(
    get,
    path = "/providers/me",
    tag = "Providers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = ProviderProfileResponse),
        (status = 404, description = "No profile for this user")
    )
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProviderProfileResponse>> {
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await?;
    Ok(Json(ProviderProfileResponse::from(profile)))
}

/// Get a provider profile by id
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "Providers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile", body = ProviderProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProviderProfileResponse>> {
    let profile = state.provider_service.get_profile(id).await?;
    Ok(Json(ProviderProfileResponse::from(profile)))
}

/// Update the authenticated provider's profile
#[utoipa::path(
    put,
    path = "/providers/me",
    tag = "Providers",
    security(("bearer_auth" = [])),
    request_body = UpdateProviderProfile,
    responses(
        (status = 200, description = "Updated profile", body = ProviderProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No profile for this user")
    )
)]
pub async fn update_own_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProviderProfile>,
) -> AppResult<Json<ProviderProfileResponse>> {
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await?;

    let updated = state
        .provider_service
        .update_profile(profile.id, payload)
        .await?;

    Ok(Json(ProviderProfileResponse::from(updated)))
}

/// Overwrite a profile's externally computed rating
#[utoipa::path(
    put,
    path = "/providers/{id}/rating",
    tag = "Providers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = SetRatingRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProviderProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn set_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetRatingRequest>,
) -> AppResult<Json<ProviderProfileResponse>> {
    let profile = state.provider_service.set_rating(id, payload.rating).await?;
    Ok(Json(ProviderProfileResponse::from(profile)))
}

/// Delete the authenticated provider's profile, its services and bookings
#[utoipa::path(
    delete,
    path = "/providers/me",
    tag = "Providers",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "No profile for this user")
    )
)]
pub async fn delete_own_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<NoContent> {
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await?;

    state.provider_service.delete_profile(profile.id).await?;
    Ok(NoContent)
}
