//! Domain layer - Core business entities and logic
//!
//! Contains the marketplace entities (users, provider profiles, catalog,
//! bookings, messaging) and their closed enums and value objects,
//! independent of infrastructure concerns.

pub mod booking;
pub mod catalog;
pub mod messaging;
pub mod password;
pub mod provider;
pub mod user;

pub use booking::{Booking, BookingResponse, BookingStatus, NewBooking};
pub use catalog::{
    CategoryResponse, CreateService, NewService, Service, ServiceCategory, ServiceFilter,
    ServiceOrder, ServiceResponse,
};
pub use messaging::{Message, MessageResponse, Notification, NotificationResponse};
pub use password::Password;
pub use provider::{
    CreateProviderProfile, NewProviderProfile, ProviderProfileResponse, ServiceProviderProfile,
    UpdateProviderProfile,
};
pub use user::{validate_phone, CreateUser, NewUser, UpdateUser, User, UserResponse, UserType};
