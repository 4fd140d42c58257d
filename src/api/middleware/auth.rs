//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserType;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token.
///
/// Scoped operations (inbox, notifications, "my bookings") take their
/// user id from here, never from the request payload.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
}

/// Pull the bearer token out of the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN_PREFIX)
}

/// Validates the bearer token and injects a [`CurrentUser`] into the
/// request extensions for handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(token)?;

    // A token minted before a schema change could carry a stale kind
    let user_type =
        UserType::try_from(claims.user_type.as_str()).map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
        user_type,
    });

    Ok(next.run(request).await)
}
