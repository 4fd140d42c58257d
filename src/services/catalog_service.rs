//! Catalog service - categories and service listings.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CreateService, NewService, Service, ServiceCategory, ServiceFilter, ServiceOrder,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a category; the name must not be empty
    async fn create_category(&self, name: String, description: String)
        -> AppResult<ServiceCategory>;

    /// Get category by ID
    async fn get_category(&self, id: Uuid) -> AppResult<ServiceCategory>;

    /// List all categories
    async fn list_categories(&self) -> AppResult<Vec<ServiceCategory>>;

    /// Update category fields
    async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<ServiceCategory>;

    /// Delete a category, cascading to its services and their bookings
    async fn delete_category(&self, id: Uuid) -> AppResult<()>;

    /// Create a service under an existing profile and category. Fails
    /// with `InvalidPrice` when the price is not strictly positive.
    async fn create_service(
        &self,
        provider_profile_id: Uuid,
        request: CreateService,
    ) -> AppResult<Service>;

    /// Get service by ID
    async fn get_service(&self, id: Uuid) -> AppResult<Service>;

    /// Substring search with optional price/rating ordering
    async fn search_services(
        &self,
        filter: ServiceFilter,
        order: Option<ServiceOrder>,
        page: PaginationParams,
    ) -> AppResult<(Vec<Service>, u64)>;

    /// Toggle whether a service is open for booking
    async fn set_service_active(&self, id: Uuid, is_active: bool) -> AppResult<Service>;

    /// Delete a service, cascading to its bookings
    async fn delete_service(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    /// Create new catalog service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn create_category(
        &self,
        name: String,
        description: String,
    ) -> AppResult<ServiceCategory> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name must not be empty"));
        }

        self.uow.categories().create(name, description).await
    }

    async fn get_category(&self, id: Uuid) -> AppResult<ServiceCategory> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list_categories(&self) -> AppResult<Vec<ServiceCategory>> {
        self.uow.categories().list().await
    }

    async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<ServiceCategory> {
        if matches!(&name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("Category name must not be empty"));
        }

        self.uow.categories().update(id, name, description).await
    }

    async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        self.uow.categories().delete_cascade(id).await
    }

    async fn create_service(
        &self,
        provider_profile_id: Uuid,
        request: CreateService,
    ) -> AppResult<Service> {
        if request.price <= Decimal::ZERO {
            return Err(AppError::InvalidPrice);
        }

        // Both sides of the classification must resolve before the insert
        self.uow
            .provider_profiles()
            .find_by_id(provider_profile_id)
            .await?
            .ok_or_not_found()?;

        self.uow
            .categories()
            .find_by_id(request.category_id)
            .await?
            .ok_or_not_found()?;

        self.uow
            .services()
            .create(NewService {
                service_provider_id: provider_profile_id,
                category_id: request.category_id,
                title: request.title,
                description: request.description,
                price: request.price,
                location: request.location,
            })
            .await
    }

    async fn get_service(&self, id: Uuid) -> AppResult<Service> {
        self.uow
            .services()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn search_services(
        &self,
        filter: ServiceFilter,
        order: Option<ServiceOrder>,
        page: PaginationParams,
    ) -> AppResult<(Vec<Service>, u64)> {
        self.uow.services().search(filter, order, page).await
    }

    async fn set_service_active(&self, id: Uuid, is_active: bool) -> AppResult<Service> {
        self.uow.services().set_active(id, is_active).await
    }

    async fn delete_service(&self, id: Uuid) -> AppResult<()> {
        self.uow.services().delete_cascade(id).await
    }
}
