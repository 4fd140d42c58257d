//! Provider profile repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{booking, provider_profile, service};
use super::map_txn_err;
use crate::domain::{NewProviderProfile, ServiceProviderProfile, UpdateProviderProfile};
use crate::errors::{AppError, AppResult};

/// Data access contract for service provider profiles.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProviderProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceProviderProfile>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<ServiceProviderProfile>>;

    async fn list(&self) -> AppResult<Vec<ServiceProviderProfile>>;

    async fn create(&self, profile: NewProviderProfile) -> AppResult<ServiceProviderProfile>;

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateProviderProfile,
    ) -> AppResult<ServiceProviderProfile>;

    /// Overwrite the externally computed rating.
    async fn set_rating(&self, id: Uuid, rating: f64) -> AppResult<ServiceProviderProfile>;

    /// Delete a profile together with its services and their bookings.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed provider profile store.
pub struct ProviderProfileStore {
    db: DatabaseConnection,
}

impl ProviderProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn apply_update(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut provider_profile::ActiveModel) + Send,
    ) -> AppResult<ServiceProviderProfile> {
        let existing = provider_profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: provider_profile::ActiveModel = existing.into();
        apply(&mut active);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceProviderProfile::from(model))
    }
}

#[async_trait]
impl ProviderProfileRepository for ProviderProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceProviderProfile>> {
        let model = provider_profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(ServiceProviderProfile::from))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<ServiceProviderProfile>> {
        let model = provider_profile::Entity::find()
            .filter(provider_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(ServiceProviderProfile::from))
    }

    async fn list(&self) -> AppResult<Vec<ServiceProviderProfile>> {
        let models = provider_profile::Entity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ServiceProviderProfile::from).collect())
    }

    async fn create(&self, profile: NewProviderProfile) -> AppResult<ServiceProviderProfile> {
        let now = Utc::now();
        let active_model = provider_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(profile.user_id),
            profession: Set(profile.profession),
            location: Set(profile.location),
            description: Set(profile.description),
            experience: Set(profile.experience),
            rating: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index on user_id enforces the one-profile-per-user rule
        let model = active_model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::conflict("Provider profile")
            } else {
                AppError::from(e)
            }
        })?;

        Ok(ServiceProviderProfile::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateProviderProfile,
    ) -> AppResult<ServiceProviderProfile> {
        self.apply_update(id, move |active| {
            if let Some(profession) = changes.profession {
                active.profession = Set(profession);
            }
            if let Some(location) = changes.location {
                active.location = Set(location);
            }
            if let Some(description) = changes.description {
                active.description = Set(description);
            }
            if let Some(experience) = changes.experience {
                active.experience = Set(experience);
            }
        })
        .await
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> AppResult<ServiceProviderProfile> {
        self.apply_update(id, move |active| {
            active.rating = Set(rating);
        })
        .await
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(|txn| {
                Box::pin(async move {
                    booking::Entity::delete_many()
                        .filter(booking::Column::ServiceProviderId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    service::Entity::delete_many()
                        .filter(service::Column::ServiceProviderId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    let result = provider_profile::Entity::delete_by_id(id)
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
