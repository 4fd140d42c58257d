//! Shared handler state: every service behind a trait object, plus the
//! database handle for health reporting.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Mailer};
use crate::services::{
    AuthService, BookingService, CatalogService, MessagingService, ProviderService,
    ServiceContainer, Services, UserService,
};

/// Cloned into every request by axum; all fields are cheap Arc handles.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub provider_service: Arc<dyn ProviderService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub booking_service: Arc<dyn BookingService>,
    pub messaging_service: Arc<dyn MessagingService>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the full service graph over one database connection.
    pub fn from_config(database: Arc<Database>, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        let container = Services::from_connection(database.handle(), config, mailer);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            provider_service: container.providers(),
            catalog_service: container.catalog(),
            booking_service: container.bookings(),
            messaging_service: container.messaging(),
            database,
        }
    }
}
