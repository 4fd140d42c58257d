//! Service repository, including catalog search.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{booking, provider_profile, service, service_category};
use super::map_txn_err;
use crate::domain::{NewService, Service, ServiceFilter, ServiceOrder};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Data access contract for catalog services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Service>>;

    async fn create(&self, service: NewService) -> AppResult<Service>;

    /// Substring search over title / description / location / category
    /// name, optionally ordered by price or provider rating. Returns the
    /// page of matches plus the total match count.
    async fn search(
        &self,
        filter: ServiceFilter,
        order: Option<ServiceOrder>,
        page: PaginationParams,
    ) -> AppResult<(Vec<Service>, u64)>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Service>;

    /// Delete a service together with its bookings.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed service store.
pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceRepository for ServiceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Service::from))
    }

    async fn create(&self, new_service: NewService) -> AppResult<Service> {
        let now = Utc::now();
        let active_model = service::ActiveModel {
            id: Set(Uuid::new_v4()),
            service_provider_id: Set(new_service.service_provider_id),
            category_id: Set(new_service.category_id),
            title: Set(new_service.title),
            description: Set(new_service.description),
            price: Set(new_service.price),
            location: Set(new_service.location),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Service::from(model))
    }

    async fn search(
        &self,
        filter: ServiceFilter,
        order: Option<ServiceOrder>,
        page: PaginationParams,
    ) -> AppResult<(Vec<Service>, u64)> {
        let mut query = service::Entity::find();

        if let Some(title) = &filter.title {
            query = query.filter(service::Column::Title.contains(title.as_str()));
        }
        if let Some(description) = &filter.description {
            query = query.filter(service::Column::Description.contains(description.as_str()));
        }
        if let Some(location) = &filter.location {
            query = query.filter(service::Column::Location.contains(location.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query
                .join(JoinType::InnerJoin, service::Relation::Category.def())
                .filter(service_category::Column::Name.contains(category.as_str()));
        }

        query = match order {
            Some(ServiceOrder::PriceAsc) => query.order_by_asc(service::Column::Price),
            Some(ServiceOrder::PriceDesc) => query.order_by_desc(service::Column::Price),
            Some(ServiceOrder::RatingAsc) => query
                .join(JoinType::InnerJoin, service::Relation::ProviderProfile.def())
                .order_by_asc(provider_profile::Column::Rating),
            Some(ServiceOrder::RatingDesc) => query
                .join(JoinType::InnerJoin, service::Relation::ProviderProfile.def())
                .order_by_desc(provider_profile::Column::Rating),
            None => query.order_by_asc(service::Column::Title),
        };

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await.map_err(AppError::from)?;
        let models = paginator
            .fetch_page(page.zero_based_page())
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Service::from).collect(), total))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Service> {
        let existing = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: service::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Service::from(model))
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(|txn| {
                Box::pin(async move {
                    booking::Entity::delete_many()
                        .filter(booking::Column::ServiceId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    let result = service::Entity::delete_by_id(id)
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
