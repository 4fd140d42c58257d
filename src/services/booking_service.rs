//! Booking service - the booking ledger use cases.
//!
//! Creation validates the client's account kind and the booking date;
//! status changes go through the exhaustive transition table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, NewBooking};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Record a client's request to engage a service at a given time.
    /// The provider profile reference is denormalized from the service.
    async fn create_booking(
        &self,
        client_user_id: Uuid,
        service_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> AppResult<Booking>;

    /// Get booking by ID
    async fn get_booking(&self, id: Uuid) -> AppResult<Booking>;

    /// Move a booking to a new status; only pending → confirmed and
    /// confirmed → completed are legal.
    async fn transition(&self, id: Uuid, to: BookingStatus) -> AppResult<Booking>;

    /// Bookings made by a client
    async fn list_for_client(&self, client_user_id: Uuid) -> AppResult<Vec<Booking>>;

    /// Bookings against a provider profile
    async fn list_for_provider(&self, provider_profile_id: Uuid) -> AppResult<Vec<Booking>>;
}

/// Concrete implementation of BookingService using Unit of Work.
pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookingManager<U> {
    /// Create new booking service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create_booking(
        &self,
        client_user_id: Uuid,
        service_id: Uuid,
        booking_date: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let client = self
            .uow
            .users()
            .find_by_id(client_user_id)
            .await?
            .ok_or_not_found()?;

        if !client.is_client() {
            return Err(AppError::InvalidUserType("client"));
        }

        if booking_date < Utc::now() {
            return Err(AppError::PastBookingDate);
        }

        let service = self
            .uow
            .services()
            .find_by_id(service_id)
            .await?
            .ok_or_not_found()?;

        self.uow
            .bookings()
            .create(NewBooking {
                client_id: client_user_id,
                service_id,
                service_provider_id: service.service_provider_id,
                booking_date,
            })
            .await
    }

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking> {
        self.uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn transition(&self, id: Uuid, to: BookingStatus) -> AppResult<Booking> {
        let booking = self
            .uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if !booking.status.can_transition_to(to) {
            return Err(AppError::InvalidStatusTransition {
                from: booking.status.to_string(),
                to: to.to_string(),
            });
        }

        self.uow.bookings().update_status(id, to).await
    }

    async fn list_for_client(&self, client_user_id: Uuid) -> AppResult<Vec<Booking>> {
        self.uow.bookings().list_for_client(client_user_id).await
    }

    async fn list_for_provider(&self, provider_profile_id: Uuid) -> AppResult<Vec<Booking>> {
        self.uow
            .bookings()
            .list_for_provider(provider_profile_id)
            .await
    }
}
