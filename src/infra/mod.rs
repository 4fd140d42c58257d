//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Schema migrations
//! - Outbound mail boundary
//! - Unit of Work for centralized repository access

pub mod db;
pub mod mailer;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, MigrationStatus, Migrator};
pub use mailer::{send_detached, LogMailer, Mailer};
pub use repositories::{
    BookingRepository, BookingStore, CategoryRepository, CategoryStore, MessageRepository,
    MessageStore, NotificationRepository, NotificationStore, ProviderProfileRepository,
    ProviderProfileStore, ServiceRepository, ServiceStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockBookingRepository, MockCategoryRepository, MockMessageRepository,
    MockNotificationRepository, MockProviderProfileRepository, MockServiceRepository,
    MockUserRepository,
};
