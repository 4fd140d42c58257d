//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod catalog_handler;
pub mod messaging_handler;
pub mod provider_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use booking_handler::booking_routes;
pub use catalog_handler::{category_routes, service_routes};
pub use messaging_handler::{message_routes, notification_routes};
pub use provider_handler::provider_routes;
pub use user_handler::user_routes;
