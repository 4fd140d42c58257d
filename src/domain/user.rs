//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::PHONE_PATTERN;
use crate::errors::{AppError, AppResult};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex")
});

/// Validate a phone number against the accepted pattern.
pub fn validate_phone(phone: &str) -> AppResult<()> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::InvalidPhoneFormat)
    }
}

/// The two kinds of account the marketplace knows about.
///
/// Stored as a string in the database; everything above the entity layer
/// works with this closed enum so mismatched values cannot circulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Client,
    ServiceProvider,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::ServiceProvider => "service_provider",
        }
    }
}

impl TryFrom<&str> for UserType {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "client" => Ok(UserType::Client),
            "service_provider" => Ok(UserType::ServiceProvider),
            other => Err(AppError::validation(format!("unknown user type: {}", other))),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_client(&self) -> bool {
        self.user_type == UserType::Client
    }

    pub fn is_service_provider(&self) -> bool {
        self.user_type == UserType::ServiceProvider
    }

    /// Display name built from the name parts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Account kind
    pub user_type: UserType,
    /// First name
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Last name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Phone number (8-15 digits, optional +)
    #[schema(example = "+33612345678")]
    pub phone_number: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: String,
}

/// Fields required to persist a new user (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: String,
}

/// Partial update applied to an existing user.
///
/// `None` leaves the field untouched. Email and phone changes are
/// re-validated by the service before reaching the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New email address
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// New first name
    pub first_name: Option<String>,
    /// New last name
    pub last_name: Option<String>,
    /// New phone number (8-15 digits, optional +)
    #[schema(example = "+33612345678")]
    pub phone_number: Option<String>,
    /// New postal address
    pub address: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account kind
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_type: user.user_type,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            address: user.address,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern_accepts_valid_numbers() {
        for phone in ["12345678", "+33612345678", "123456789012345"] {
            assert!(validate_phone(phone).is_ok(), "{phone} should be valid");
        }
    }

    #[test]
    fn phone_pattern_rejects_invalid_numbers() {
        for phone in ["1234567", "1234567890123456", "+", "06-12-34-56", "abcdefgh", ""] {
            assert!(
                matches!(validate_phone(phone), Err(AppError::InvalidPhoneFormat)),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn user_type_round_trips_through_strings() {
        assert_eq!(UserType::try_from("client").unwrap(), UserType::Client);
        assert_eq!(
            UserType::try_from("service_provider").unwrap(),
            UserType::ServiceProvider
        );
        assert_eq!(UserType::Client.as_str(), "client");
        assert_eq!(UserType::ServiceProvider.as_str(), "service_provider");
    }

    #[test]
    fn unknown_user_type_is_rejected() {
        assert!(UserType::try_from("admin").is_err());
    }
}
