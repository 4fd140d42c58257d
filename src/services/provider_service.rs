//! Provider profile service.
//!
//! The one-profile-per-provider rule and the user-type constraint are
//! checked here: the schema can only see foreign keys, not account kinds.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CreateProviderProfile, NewProviderProfile, ServiceProviderProfile, UpdateProviderProfile,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Provider profile service trait for dependency injection.
#[async_trait]
pub trait ProviderService: Send + Sync {
    /// Create a profile for a `service_provider` user. Fails with
    /// `InvalidUserType` for any other account kind and with
    /// `NegativeExperience` for a negative experience value.
    async fn create_profile(
        &self,
        user_id: Uuid,
        request: CreateProviderProfile,
    ) -> AppResult<ServiceProviderProfile>;

    /// Get profile by ID
    async fn get_profile(&self, id: Uuid) -> AppResult<ServiceProviderProfile>;

    /// Get the profile owned by a user
    async fn get_profile_for_user(&self, user_id: Uuid) -> AppResult<ServiceProviderProfile>;

    /// List all provider profiles
    async fn list_profiles(&self) -> AppResult<Vec<ServiceProviderProfile>>;

    /// Update profile details (same experience-sign check as creation)
    async fn update_profile(
        &self,
        id: Uuid,
        changes: UpdateProviderProfile,
    ) -> AppResult<ServiceProviderProfile>;

    /// Recompute hook: overwrite the externally computed rating
    async fn set_rating(&self, id: Uuid, rating: f64) -> AppResult<ServiceProviderProfile>;

    /// Delete a profile, cascading to its services and their bookings
    async fn delete_profile(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProviderService using Unit of Work.
pub struct ProviderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProviderManager<U> {
    /// Create new provider service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProviderService for ProviderManager<U> {
    async fn create_profile(
        &self,
        user_id: Uuid,
        request: CreateProviderProfile,
    ) -> AppResult<ServiceProviderProfile> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found()?;

        if !user.is_service_provider() {
            return Err(AppError::InvalidUserType("service_provider"));
        }

        if request.experience < 0 {
            return Err(AppError::NegativeExperience);
        }

        self.uow
            .provider_profiles()
            .create(NewProviderProfile {
                user_id,
                profession: request.profession,
                location: request.location,
                description: request.description,
                experience: request.experience,
            })
            .await
    }

    async fn get_profile(&self, id: Uuid) -> AppResult<ServiceProviderProfile> {
        self.uow
            .provider_profiles()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn get_profile_for_user(&self, user_id: Uuid) -> AppResult<ServiceProviderProfile> {
        self.uow
            .provider_profiles()
            .find_by_user_id(user_id)
            .await?
            .ok_or_not_found()
    }

    async fn list_profiles(&self) -> AppResult<Vec<ServiceProviderProfile>> {
        self.uow.provider_profiles().list().await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: UpdateProviderProfile,
    ) -> AppResult<ServiceProviderProfile> {
        if matches!(changes.experience, Some(experience) if experience < 0) {
            return Err(AppError::NegativeExperience);
        }

        self.uow.provider_profiles().update(id, changes).await
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> AppResult<ServiceProviderProfile> {
        self.uow.provider_profiles().set_rating(id, rating).await
    }

    async fn delete_profile(&self, id: Uuid) -> AppResult<()> {
        self.uow.provider_profiles().delete_cascade(id).await
    }
}
