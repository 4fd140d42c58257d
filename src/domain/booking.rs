//! Booking entity and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Booking lifecycle. `Pending` is initial, `Completed` is terminal.
///
/// The only legal moves are pending → confirmed → completed. There is no
/// cancellation or rejection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
        }
    }

    /// Exhaustive transition table.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }
}

impl TryFrom<&str> for BookingStatus {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(AppError::validation(format!(
                "unknown booking status: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client's request to engage a service at a given time.
///
/// `service_provider_id` is denormalized from the service at creation so
/// provider-side listings do not need a join through the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub service_provider_id: Uuid,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to persist a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub service_provider_id: Uuid,
    pub booking_date: DateTime<Utc>,
}

/// Booking response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub service_provider_id: Uuid,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            client_id: booking.client_id,
            service_id: booking.service_id,
            service_provider_id: booking.service_provider_id,
            booking_date: booking.booking_date,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn illegal_transitions() {
        // No skipping, no regression, no self-loop
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Confirmed));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(BookingStatus::try_from("cancelled").is_err());
    }
}
