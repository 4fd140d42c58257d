//! Authentication handlers: registration, login, password reset.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, UserResponse, UserType};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::ApiResponse;

/// Account registration payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Email address, unique across all accounts
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.net")]
    pub email: String,
    /// Password, at least 8 characters
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "correct-horse-42", min_length = 8)]
    pub password: String,
    /// Account kind
    pub user_type: UserType,
    /// First name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Last name
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Phone number (8-15 digits, optional +)
    #[schema(example = "+33612345678")]
    pub phone_number: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: String,
}

/// Login payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Email address of the account
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.net")]
    pub email: String,
    /// Account password
    #[schema(example = "correct-horse-42")]
    pub password: String,
}

/// Password reset payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email of the account to reset
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.net")]
    pub email: String,
}

/// Public authentication routes (the only unauthenticated surface
/// besides the health check)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(CreateUser {
            email: payload.email,
            password: payload.password,
            user_type: payload.user_type,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
            address: payload.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange credentials for a JWT
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Request a password reset email.
///
/// Always answers the same way so account existence cannot be probed.
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent if the account exists"),
        (status = 400, description = "Validation error")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.auth_service.forgot_password(payload.email).await?;

    Ok(Json(ApiResponse::message(
        "If the account exists, a reset email has been sent",
    )))
}
