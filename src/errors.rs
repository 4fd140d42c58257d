//! Centralized error handling.
//!
//! One error type for the whole application, covering the domain failure
//! taxonomy (duplicate email, invalid transitions, ...) as well as
//! infrastructure failures, with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Domain rule violations
    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error("Phone number must be 8 to 15 digits, optionally prefixed with +")]
    InvalidPhoneFormat,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Experience must not be negative")]
    NegativeExperience,

    #[error("Operation requires a user of type {0}")]
    InvalidUserType(&'static str),

    #[error("Booking date must not be in the past")]
    PastBookingDate,

    #[error("Booking cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire format for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    /// Stable machine-readable code, paired with the HTTP status.
    fn parts(&self) -> (StatusCode, &'static str) {
        use AppError::*;

        match self {
            Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            Jwt(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            InvalidPhoneFormat => (StatusCode::BAD_REQUEST, "INVALID_PHONE_FORMAT"),
            InvalidPrice => (StatusCode::BAD_REQUEST, "INVALID_PRICE"),
            NegativeExperience => (StatusCode::BAD_REQUEST, "NEGATIVE_EXPERIENCE"),
            InvalidUserType(_) => (StatusCode::BAD_REQUEST, "INVALID_USER_TYPE"),
            PastBookingDate => (StatusCode::BAD_REQUEST, "PAST_BOOKING_DATE"),
            InvalidStatusTransition { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_STATUS_TRANSITION")
            }
            Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Whether the full error text is safe to hand to the caller.
    /// Infrastructure details stay in the logs.
    fn is_public(&self) -> bool {
        !matches!(
            self,
            AppError::Database(_) | AppError::Jwt(_) | AppError::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = if self.is_public() {
            self.to_string()
        } else {
            tracing::error!("{}", self);
            match &self {
                AppError::Jwt(_) => "Invalid or expired token".to_string(),
                _ => "An internal error occurred".to_string(),
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
