//! Service category repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{booking, service, service_category};
use super::map_txn_err;
use crate::domain::ServiceCategory;
use crate::errors::{AppError, AppResult};

/// Data access contract for service categories.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceCategory>>;

    async fn list(&self) -> AppResult<Vec<ServiceCategory>>;

    async fn create(&self, name: String, description: String) -> AppResult<ServiceCategory>;

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<ServiceCategory>;

    /// Delete a category together with its services and their bookings.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed category store.
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceCategory>> {
        let model = service_category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(ServiceCategory::from))
    }

    async fn list(&self) -> AppResult<Vec<ServiceCategory>> {
        let models = service_category::Entity::find()
            .order_by_asc(service_category::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ServiceCategory::from).collect())
    }

    async fn create(&self, name: String, description: String) -> AppResult<ServiceCategory> {
        let now = Utc::now();
        let active_model = service_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceCategory::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<ServiceCategory> {
        let existing = service_category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: service_category::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceCategory::from(model))
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(|txn| {
                Box::pin(async move {
                    let service_ids: Vec<Uuid> = service::Entity::find()
                        .filter(service::Column::CategoryId.eq(id))
                        .all(txn)
                        .await
                        .map_err(AppError::from)?
                        .into_iter()
                        .map(|s| s.id)
                        .collect();

                    if !service_ids.is_empty() {
                        booking::Entity::delete_many()
                            .filter(booking::Column::ServiceId.is_in(service_ids))
                            .exec(txn)
                            .await
                            .map_err(AppError::from)?;

                        service::Entity::delete_many()
                            .filter(service::Column::CategoryId.eq(id))
                            .exec(txn)
                            .await
                            .map_err(AppError::from)?;
                    }

                    let result = service_category::Entity::delete_by_id(id)
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
