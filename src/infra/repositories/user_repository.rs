//! User repository - identity store data access.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{booking, message, notification, provider_profile, service, user};
use super::map_txn_err;
use crate::domain::{NewUser, UpdateUser, User, UserType};
use crate::errors::{AppError, AppResult};

/// Data access contract for user records.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users, optionally restricted to one account kind.
    async fn list(&self, user_type: Option<UserType>) -> AppResult<Vec<User>>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Delete a user and every record that exists only in relation to it:
    /// provider profile, its services, all dependent bookings, plus the
    /// user's messages and notifications. All-or-nothing.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed user store.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-index violation on insert/update to the domain error.
/// The index is the source of truth; the service-level pre-check only
/// exists for a friendlier fast path.
fn map_unique_email(e: sea_orm::DbErr) -> AppError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::DuplicateEmail
    } else {
        AppError::from(e)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(User::try_from).transpose()
    }

    async fn list(&self, user_type: Option<UserType>) -> AppResult<Vec<User>> {
        let mut query = user::Entity::find();
        if let Some(kind) = user_type {
            query = query.filter(user::Column::UserType.eq(kind.as_str()));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        models.into_iter().map(User::try_from).collect()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            user_type: Set(new_user.user_type.as_str().to_string()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            phone_number: Set(new_user.phone_number),
            address: Set(new_user.address),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_unique_email)?;

        User::try_from(model)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let model = self
            .db
            .transaction::<_, user::Model, AppError>(|txn| {
                Box::pin(async move {
                    let existing = user::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let mut active: user::ActiveModel = existing.into();

                    if let Some(email) = changes.email {
                        active.email = Set(email);
                    }
                    if let Some(first_name) = changes.first_name {
                        active.first_name = Set(first_name);
                    }
                    if let Some(last_name) = changes.last_name {
                        active.last_name = Set(last_name);
                    }
                    if let Some(phone_number) = changes.phone_number {
                        active.phone_number = Set(Some(phone_number));
                    }
                    if let Some(address) = changes.address {
                        active.address = Set(address);
                    }
                    active.updated_at = Set(Utc::now());

                    active.update(txn).await.map_err(map_unique_email)
                })
            })
            .await
            .map_err(map_txn_err)?;

        User::try_from(model)
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(|txn| {
                Box::pin(async move {
                    cascade_delete_user(txn, id).await?;

                    let result = user::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    if result.rows_affected == 0 {
                        return Err(AppError::NotFound);
                    }

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)
    }
}

/// Remove everything owned, directly or transitively, by a user.
///
/// Deletion order follows the ownership graph bottom-up so no statement
/// ever references a row removed earlier in the same transaction:
/// bookings, then services, then the provider profile, then messages and
/// notifications.
async fn cascade_delete_user(txn: &DatabaseTransaction, user_id: Uuid) -> AppResult<()> {
    let profile_ids: Vec<Uuid> = provider_profile::Entity::find()
        .filter(provider_profile::Column::UserId.eq(user_id))
        .all(txn)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(|p| p.id)
        .collect();

    // Bookings made by the user as a client, plus bookings against any of
    // the user's provider profiles.
    let mut booking_filter = Condition::any().add(booking::Column::ClientId.eq(user_id));
    if !profile_ids.is_empty() {
        booking_filter =
            booking_filter.add(booking::Column::ServiceProviderId.is_in(profile_ids.clone()));
    }
    booking::Entity::delete_many()
        .filter(booking_filter)
        .exec(txn)
        .await
        .map_err(AppError::from)?;

    if !profile_ids.is_empty() {
        service::Entity::delete_many()
            .filter(service::Column::ServiceProviderId.is_in(profile_ids))
            .exec(txn)
            .await
            .map_err(AppError::from)?;

        provider_profile::Entity::delete_many()
            .filter(provider_profile::Column::UserId.eq(user_id))
            .exec(txn)
            .await
            .map_err(AppError::from)?;
    }

    message::Entity::delete_many()
        .filter(
            Condition::any()
                .add(message::Column::SenderId.eq(user_id))
                .add(message::Column::ReceiverId.eq(user_id)),
        )
        .exec(txn)
        .await
        .map_err(AppError::from)?;

    notification::Entity::delete_many()
        .filter(notification::Column::UserId.eq(user_id))
        .exec(txn)
        .await
        .map_err(AppError::from)?;

    Ok(())
}
