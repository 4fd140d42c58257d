//! Authentication service - login, token verification, password reset.
//!
//! Registration is handled by the user service; this service only issues
//! and verifies credentials, plus the enumeration-resistant reset flow.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{send_detached, Mailer, UnitOfWork};

/// A well-formed Argon2 hash that matches no password. Login verifies
/// against it when the account does not exist, so a missing account and
/// a wrong password cost the same wall-clock time.
const PHANTOM_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub user_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Start the password-reset flow. The response is identical whether
    /// or not the email belongs to an account, and the mail send is
    /// fire-and-forget.
    async fn forgot_password(&self, email: String) -> AppResult<()>;
}

/// Sign a token for an authenticated user.
fn issue_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        user_type: user.user_type.to_string(),
        exp: (now + Duration::hours(config.jwt_expiration_hours)).timestamp(),
        iat: now.timestamp(),
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    mailer: Arc<dyn Mailer>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self { uow, config, mailer }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        // Always run one Argon2 verification, against the phantom hash
        // when the account is missing
        let hash = user
            .as_ref()
            .map_or(PHANTOM_HASH, |u| u.password_hash.as_str());
        let password_valid = Password::from_hash(hash.to_string()).verify(&password);

        match user {
            Some(user) if password_valid => issue_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        // The caller gets the same answer either way, so a missing
        // account cannot be distinguished from an existing one.
        if let Some(user) = self.uow.users().find_by_email(&email).await? {
            let body = format!(
                "Hello {},\n\nA password reset was requested for your account. \
                 If this was you, follow the instructions in your account settings. \
                 Otherwise you can ignore this message.",
                user.full_name()
            );
            send_detached(
                self.mailer.clone(),
                user.email,
                "Password reset requested".to_string(),
                body,
            );
        } else {
            tracing::debug!("Password reset requested for unknown email");
        }

        Ok(())
    }
}
