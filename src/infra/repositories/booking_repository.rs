//! Booking repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::booking;
use crate::domain::{Booking, BookingStatus, NewBooking};
use crate::errors::{AppError, AppResult};

/// Data access contract for bookings.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Persist a booking in its initial `pending` state.
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    /// Write a new status. Transition legality is the caller's concern.
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking>;

    async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Booking>>;

    async fn list_for_provider(&self, provider_profile_id: Uuid) -> AppResult<Vec<Booking>>;
}

/// SeaORM-backed booking store.
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(Booking::try_from).transpose()
    }

    async fn create(&self, new_booking: NewBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let active_model = booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(new_booking.client_id),
            service_id: Set(new_booking.service_id),
            service_provider_id: Set(new_booking.service_provider_id),
            booking_date: Set(new_booking.booking_date),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Booking::try_from(model)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Booking::try_from(model)
    }

    async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::ClientId.eq(client_id))
            .order_by_asc(booking::Column::BookingDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Booking::try_from).collect()
    }

    async fn list_for_provider(&self, provider_profile_id: Uuid) -> AppResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::ServiceProviderId.eq(provider_profile_id))
            .order_by_asc(booking::Column::BookingDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Booking::try_from).collect()
    }
}
