//! User service - identity store use cases.
//!
//! Every mutating operation validates its inputs here, before anything
//! reaches the store: phone format, email uniqueness, password strength.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_phone, CreateUser, NewUser, Password, UpdateUser, User, UserType};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user account. Fails with `DuplicateEmail` or
    /// `InvalidPhoneFormat` when the corresponding rule is violated.
    async fn create_user(&self, request: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List users, optionally filtered by account kind
    async fn list_users(&self, user_type: Option<UserType>) -> AppResult<Vec<User>>;

    /// Update user details, re-validating email and phone on change
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Delete a user and cascade to every dependent record
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, request: CreateUser) -> AppResult<User> {
        // Email format is validated by the handler's ValidatedJson extractor
        if let Some(phone) = &request.phone_number {
            validate_phone(phone)?;
        }

        // Friendly fast path; the unique index still closes the race window
        if self
            .uow
            .users()
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = Password::new(&request.password)?.into_string();

        self.uow
            .users()
            .create(NewUser {
                email: request.email,
                password_hash,
                user_type: request.user_type,
                first_name: request.first_name,
                last_name: request.last_name,
                phone_number: request.phone_number,
                address: request.address,
            })
            .await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or_not_found()
    }

    async fn list_users(&self, user_type: Option<UserType>) -> AppResult<Vec<User>> {
        self.uow.users().list(user_type).await
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        if let Some(phone) = &changes.phone_number {
            validate_phone(phone)?;
        }

        if let Some(email) = &changes.email {
            if let Some(other) = self.uow.users().find_by_email(email).await? {
                if other.id != id {
                    return Err(AppError::DuplicateEmail);
                }
            }
        }

        self.uow.users().update(id, changes).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete_cascade(id).await
    }
}
