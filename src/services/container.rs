//! Service Container - centralized service wiring.
//!
//! Builds every application service over one shared Unit of Work and
//! exposes them behind trait objects for handler injection.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AuthService, Authenticator, BookingManager, BookingService, CatalogManager, CatalogService,
    MessagingManager, MessagingService, ProviderManager, ProviderService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Mailer, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get provider profile service
    fn providers(&self) -> Arc<dyn ProviderService>;

    /// Get catalog service
    fn catalog(&self) -> Arc<dyn CatalogService>;

    /// Get booking service
    fn bookings(&self) -> Arc<dyn BookingService>;

    /// Get messaging service
    fn messaging(&self) -> Arc<dyn MessagingService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    provider_service: Arc<dyn ProviderService>,
    catalog_service: Arc<dyn CatalogService>,
    booking_service: Arc<dyn BookingService>,
    messaging_service: Arc<dyn MessagingService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(
        db: DatabaseConnection,
        config: Config,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config, mailer)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            provider_service: Arc::new(ProviderManager::new(uow.clone())),
            catalog_service: Arc::new(CatalogManager::new(uow.clone())),
            booking_service: Arc::new(BookingManager::new(uow.clone())),
            messaging_service: Arc::new(MessagingManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn providers(&self) -> Arc<dyn ProviderService> {
        self.provider_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn messaging(&self) -> Arc<dyn MessagingService> {
        self.messaging_service.clone()
    }
}
