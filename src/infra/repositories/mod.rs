//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Multi-step writes (cascade deletes, read-modify-write updates) run
//! inside SeaORM transactions owned by the concrete stores.

mod booking_repository;
mod category_repository;
pub(crate) mod entities;
mod messaging_repository;
mod provider_repository;
mod service_repository;
mod user_repository;

use sea_orm::TransactionError;

use crate::errors::AppError;

pub use booking_repository::{BookingRepository, BookingStore};
pub use category_repository::{CategoryRepository, CategoryStore};
pub use messaging_repository::{
    MessageRepository, MessageStore, NotificationRepository, NotificationStore,
};
pub use provider_repository::{ProviderProfileRepository, ProviderProfileStore};
pub use service_repository::{ServiceRepository, ServiceStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use messaging_repository::{MockMessageRepository, MockNotificationRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use provider_repository::MockProviderProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_repository::MockServiceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Collapse a SeaORM transaction error into the application error.
pub(crate) fn map_txn_err(e: TransactionError<AppError>) -> AppError {
    match e {
        TransactionError::Connection(db) => AppError::from(db),
        TransactionError::Transaction(app) => app,
    }
}
