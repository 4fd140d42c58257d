//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait rather than on concrete stores, keeping
//! the persistence wiring in one place. Transaction scoping lives inside
//! the stores themselves: every multi-step write (cascade delete,
//! read-modify-write update) opens its own SeaORM transaction, and
//! single-statement writes rely on the store's constraints (unique email
//! index, foreign keys) as the final arbiter under concurrency.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    BookingRepository, BookingStore, CategoryRepository, CategoryStore, MessageRepository,
    MessageStore, NotificationRepository, NotificationStore, ProviderProfileRepository,
    ProviderProfileStore, ServiceRepository, ServiceStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get provider profile repository
    fn provider_profiles(&self) -> Arc<dyn ProviderProfileRepository>;

    /// Get service category repository
    fn categories(&self) -> Arc<dyn CategoryRepository>;

    /// Get service repository
    fn services(&self) -> Arc<dyn ServiceRepository>;

    /// Get booking repository
    fn bookings(&self) -> Arc<dyn BookingRepository>;

    /// Get message repository
    fn messages(&self) -> Arc<dyn MessageRepository>;

    /// Get notification repository
    fn notifications(&self) -> Arc<dyn NotificationRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    provider_repo: Arc<ProviderProfileStore>,
    category_repo: Arc<CategoryStore>,
    service_repo: Arc<ServiceStore>,
    booking_repo: Arc<BookingStore>,
    message_repo: Arc<MessageStore>,
    notification_repo: Arc<NotificationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            provider_repo: Arc::new(ProviderProfileStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            service_repo: Arc::new(ServiceStore::new(db.clone())),
            booking_repo: Arc::new(BookingStore::new(db.clone())),
            message_repo: Arc::new(MessageStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn provider_profiles(&self) -> Arc<dyn ProviderProfileRepository> {
        self.provider_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn services(&self) -> Arc<dyn ServiceRepository> {
        self.service_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        self.message_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }
}
