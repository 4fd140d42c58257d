//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, booking_handler, catalog_handler, messaging_handler, provider_handler,
    user_handler,
};
use crate::domain::{
    BookingResponse, BookingStatus, CategoryResponse, MessageResponse, NotificationResponse,
    ProviderProfileResponse, ServiceOrder, ServiceResponse, UpdateProviderProfile, UserResponse,
    UserType,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the ProFinder API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProFinder API",
        version = "0.1.0",
        description = "Marketplace API connecting clients with service providers",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::forgot_password,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_current_user,
        user_handler::delete_current_user,
        // Provider endpoints
        provider_handler::create_profile,
        provider_handler::list_profiles,
        provider_handler::get_own_profile,
        provider_handler::get_profile,
        provider_handler::update_own_profile,
        provider_handler::set_rating,
        provider_handler::delete_own_profile,
        // Catalog endpoints
        catalog_handler::create_category,
        catalog_handler::list_categories,
        catalog_handler::get_category,
        catalog_handler::update_category,
        catalog_handler::delete_category,
        catalog_handler::create_service,
        catalog_handler::search_services,
        catalog_handler::get_service,
        catalog_handler::set_service_active,
        catalog_handler::delete_service,
        // Booking endpoints
        booking_handler::create_booking,
        booking_handler::list_own_bookings,
        booking_handler::list_provider_bookings,
        booking_handler::get_booking,
        booking_handler::transition_booking,
        // Messaging endpoints
        messaging_handler::send_message,
        messaging_handler::inbox,
        messaging_handler::notify,
        messaging_handler::list_notifications,
        messaging_handler::mark_notification_read,
    ),
    components(
        schemas(
            // Domain types
            UserType,
            UserResponse,
            ProviderProfileResponse,
            UpdateProviderProfile,
            CategoryResponse,
            ServiceResponse,
            ServiceOrder,
            BookingStatus,
            BookingResponse,
            MessageResponse,
            NotificationResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            TokenResponse,
            // Handler request types
            user_handler::UpdateUserRequest,
            provider_handler::CreateProfileRequest,
            provider_handler::SetRatingRequest,
            catalog_handler::CreateCategoryRequest,
            catalog_handler::UpdateCategoryRequest,
            catalog_handler::CreateServiceRequest,
            catalog_handler::SetActiveRequest,
            booking_handler::CreateBookingRequest,
            booking_handler::TransitionRequest,
            messaging_handler::SendMessageRequest,
            messaging_handler::NotifyRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and password reset"),
        (name = "Users", description = "Account management"),
        (name = "Providers", description = "Service provider profiles"),
        (name = "Catalog", description = "Categories and service listings"),
        (name = "Bookings", description = "Booking ledger"),
        (name = "Messaging", description = "Messages and notifications")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
