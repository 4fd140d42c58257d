//! Shared in-memory test doubles.
//!
//! Each fake implements a repository trait over a shared in-memory table
//! set, emulating the store's constraints (unique email, unique profile
//! per user, cascade graph) so service behavior can be exercised without
//! a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use profinder::domain::{
    Booking, BookingStatus, Message, NewBooking, NewProviderProfile, NewService, NewUser,
    Notification, Service, ServiceCategory, ServiceFilter, ServiceOrder, ServiceProviderProfile,
    UpdateProviderProfile, UpdateUser, User, UserType,
};
use profinder::errors::{AppError, AppResult};
use profinder::infra::{
    BookingRepository, CategoryRepository, MessageRepository, NotificationRepository,
    ProviderProfileRepository, ServiceRepository, UnitOfWork, UserRepository,
};
use profinder::types::PaginationParams;

/// Shared in-memory tables.
#[derive(Default)]
pub struct InMemoryDb {
    pub users: Mutex<Vec<User>>,
    pub profiles: Mutex<Vec<ServiceProviderProfile>>,
    pub categories: Mutex<Vec<ServiceCategory>>,
    pub services: Mutex<Vec<Service>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub messages: Mutex<Vec<Message>>,
    pub notifications: Mutex<Vec<Notification>>,
}

impl InMemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a user directly, bypassing service validation.
    pub fn seed_user(&self, user_type: UserType, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
            user_type,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: None,
            address: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Insert a provider profile directly.
    pub fn seed_profile(&self, user_id: Uuid) -> ServiceProviderProfile {
        let now = Utc::now();
        let profile = ServiceProviderProfile {
            id: Uuid::new_v4(),
            user_id,
            profession: "Plumber".to_string(),
            location: "Paris".to_string(),
            description: String::new(),
            experience: 3,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        };
        self.profiles.lock().unwrap().push(profile.clone());
        profile
    }

    /// Insert a category directly.
    pub fn seed_category(&self, name: &str) -> ServiceCategory {
        let now = Utc::now();
        let category = ServiceCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    /// Insert a service directly.
    pub fn seed_service(
        &self,
        profile_id: Uuid,
        category_id: Uuid,
        title: &str,
        price: Decimal,
    ) -> Service {
        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            service_provider_id: profile_id,
            category_id,
            title: title.to_string(),
            description: String::new(),
            price,
            location: "Paris".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.services.lock().unwrap().push(service.clone());
        service
    }

    /// Insert a message with an explicit timestamp.
    pub fn seed_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content: content.to_string(),
            created_at: at,
        };
        self.messages.lock().unwrap().push(message.clone());
        message
    }

    /// Insert a notification directly.
    pub fn seed_notification(&self, user_id: Uuid, read: bool) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            content: "ping".to_string(),
            read,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        notification
    }
}

/// A timestamp safely in the future.
pub fn tomorrow() -> DateTime<Utc> {
    Utc::now() + Duration::days(1)
}

/// A timestamp safely in the past.
pub fn yesterday() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

// =============================================================================
// Repository fakes
// =============================================================================

pub struct InMemoryUsers(pub Arc<InMemoryDb>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.0.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, user_type: Option<UserType>) -> AppResult<Vec<User>> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| user_type.map_or(true, |t| u.user_type == t))
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.0.users.lock().unwrap();

        // Emulates the unique email index
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            user_type: new_user.user_type,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone_number: new_user.phone_number,
            address: new_user.address,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut users = self.0.users.lock().unwrap();

        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(AppError::DuplicateEmail);
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(phone_number) = changes.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(address) = changes.address {
            user.address = address;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        let db = &self.0;

        let profile_ids: Vec<Uuid> = db
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();

        db.bookings
            .lock()
            .unwrap()
            .retain(|b| b.client_id != id && !profile_ids.contains(&b.service_provider_id));
        db.services
            .lock()
            .unwrap()
            .retain(|s| !profile_ids.contains(&s.service_provider_id));
        db.profiles.lock().unwrap().retain(|p| p.user_id != id);
        db.messages
            .lock()
            .unwrap()
            .retain(|m| m.sender_id != id && m.receiver_id != id);
        db.notifications.lock().unwrap().retain(|n| n.user_id != id);

        let mut users = db.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

pub struct InMemoryProfiles(pub Arc<InMemoryDb>);

#[async_trait]
impl ProviderProfileRepository for InMemoryProfiles {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceProviderProfile>> {
        Ok(self
            .0
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<ServiceProviderProfile>> {
        Ok(self
            .0
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<ServiceProviderProfile>> {
        Ok(self.0.profiles.lock().unwrap().clone())
    }

    async fn create(&self, new_profile: NewProviderProfile) -> AppResult<ServiceProviderProfile> {
        let mut profiles = self.0.profiles.lock().unwrap();

        // Emulates the unique user_id index
        if profiles.iter().any(|p| p.user_id == new_profile.user_id) {
            return Err(AppError::conflict("Provider profile"));
        }

        let now = Utc::now();
        let profile = ServiceProviderProfile {
            id: Uuid::new_v4(),
            user_id: new_profile.user_id,
            profession: new_profile.profession,
            location: new_profile.location,
            description: new_profile.description,
            experience: new_profile.experience,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        };
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateProviderProfile,
    ) -> AppResult<ServiceProviderProfile> {
        let mut profiles = self.0.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(profession) = changes.profession {
            profile.profession = profession;
        }
        if let Some(location) = changes.location {
            profile.location = location;
        }
        if let Some(description) = changes.description {
            profile.description = description;
        }
        if let Some(experience) = changes.experience {
            profile.experience = experience;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    async fn set_rating(&self, id: Uuid, rating: f64) -> AppResult<ServiceProviderProfile> {
        let mut profiles = self.0.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        profile.rating = rating;
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        let db = &self.0;

        db.bookings
            .lock()
            .unwrap()
            .retain(|b| b.service_provider_id != id);
        db.services
            .lock()
            .unwrap()
            .retain(|s| s.service_provider_id != id);

        let mut profiles = db.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

pub struct InMemoryCategories(pub Arc<InMemoryDb>);

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceCategory>> {
        Ok(self
            .0
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<ServiceCategory>> {
        let mut categories = self.0.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, name: String, description: String) -> AppResult<ServiceCategory> {
        let now = Utc::now();
        let category = ServiceCategory {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: now,
            updated_at: now,
        };
        self.0.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<ServiceCategory> {
        let mut categories = self.0.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(name) = name {
            category.name = name;
        }
        if let Some(description) = description {
            category.description = description;
        }
        category.updated_at = Utc::now();

        Ok(category.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        let db = &self.0;

        let service_ids: Vec<Uuid> = db
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.category_id == id)
            .map(|s| s.id)
            .collect();

        db.bookings
            .lock()
            .unwrap()
            .retain(|b| !service_ids.contains(&b.service_id));
        db.services.lock().unwrap().retain(|s| s.category_id != id);

        let mut categories = db.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

pub struct InMemoryServices(pub Arc<InMemoryDb>);

#[async_trait]
impl ServiceRepository for InMemoryServices {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Service>> {
        Ok(self
            .0
            .services
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create(&self, new_service: NewService) -> AppResult<Service> {
        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            service_provider_id: new_service.service_provider_id,
            category_id: new_service.category_id,
            title: new_service.title,
            description: new_service.description,
            price: new_service.price,
            location: new_service.location,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.0.services.lock().unwrap().push(service.clone());
        Ok(service)
    }

    async fn search(
        &self,
        filter: ServiceFilter,
        order: Option<ServiceOrder>,
        page: PaginationParams,
    ) -> AppResult<(Vec<Service>, u64)> {
        let db = &self.0;
        let categories = db.categories.lock().unwrap().clone();
        let profiles = db.profiles.lock().unwrap().clone();

        let category_name = |service: &Service| {
            categories
                .iter()
                .find(|c| c.id == service.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };
        let rating = |service: &Service| {
            profiles
                .iter()
                .find(|p| p.id == service.service_provider_id)
                .map(|p| p.rating)
                .unwrap_or(0.0)
        };

        let mut matches: Vec<Service> = db
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| filter.title.as_ref().map_or(true, |t| s.title.contains(t.as_str())))
            .filter(|s| {
                filter
                    .description
                    .as_ref()
                    .map_or(true, |d| s.description.contains(d.as_str()))
            })
            .filter(|s| {
                filter
                    .location
                    .as_ref()
                    .map_or(true, |l| s.location.contains(l.as_str()))
            })
            .filter(|s| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| category_name(s).contains(c.as_str()))
            })
            .cloned()
            .collect();

        match order {
            Some(ServiceOrder::PriceAsc) => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(ServiceOrder::PriceDesc) => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(ServiceOrder::RatingAsc) => {
                matches.sort_by(|a, b| rating(a).total_cmp(&rating(b)))
            }
            Some(ServiceOrder::RatingDesc) => {
                matches.sort_by(|a, b| rating(b).total_cmp(&rating(a)))
            }
            None => matches.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        let total = matches.len() as u64;
        let start = ((page.page.saturating_sub(1)) * page.limit()) as usize;
        let paged: Vec<Service> = matches
            .into_iter()
            .skip(start)
            .take(page.limit() as usize)
            .collect();

        Ok((paged, total))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Service> {
        let mut services = self.0.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;

        service.is_active = is_active;
        service.updated_at = Utc::now();

        Ok(service.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<()> {
        let db = &self.0;

        db.bookings.lock().unwrap().retain(|b| b.service_id != id);

        let mut services = db.services.lock().unwrap();
        let before = services.len();
        services.retain(|s| s.id != id);
        if services.len() == before {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

pub struct InMemoryBookings(pub Arc<InMemoryDb>);

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn create(&self, new_booking: NewBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            client_id: new_booking.client_id,
            service_id: new_booking.service_id,
            service_provider_id: new_booking.service_provider_id,
            booking_date: new_booking.booking_date,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.0.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.0.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound)?;

        booking.status = status;
        booking.updated_at = Utc::now();

        Ok(booking.clone())
    }

    async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Booking>> {
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn list_for_provider(&self, provider_profile_id: Uuid) -> AppResult<Vec<Booking>> {
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.service_provider_id == provider_profile_id)
            .cloned()
            .collect())
    }
}

pub struct InMemoryMessages(pub Arc<InMemoryDb>);

#[async_trait]
impl MessageRepository for InMemoryMessages {
    async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            created_at: Utc::now(),
        };
        self.0.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list_for_receiver(&self, receiver_id: Uuid) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .0
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.receiver_id == receiver_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}

pub struct InMemoryNotifications(pub Arc<InMemoryDb>);

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn create(&self, user_id: Uuid, content: String) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            content,
            read: false,
            created_at: Utc::now(),
        };
        self.0
            .notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Notification> {
        let mut notifications = self.0.notifications.lock().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AppError::NotFound)?;

        notification.read = true;

        Ok(notification.clone())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .0
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by_key(|n| n.created_at);
        Ok(notifications)
    }
}

/// Unit of Work over the in-memory tables.
pub struct TestUow {
    pub db: Arc<InMemoryDb>,
}

impl TestUow {
    pub fn new(db: Arc<InMemoryDb>) -> Arc<Self> {
        Arc::new(Self { db })
    }
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(InMemoryUsers(self.db.clone()))
    }

    fn provider_profiles(&self) -> Arc<dyn ProviderProfileRepository> {
        Arc::new(InMemoryProfiles(self.db.clone()))
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        Arc::new(InMemoryCategories(self.db.clone()))
    }

    fn services(&self) -> Arc<dyn ServiceRepository> {
        Arc::new(InMemoryServices(self.db.clone()))
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        Arc::new(InMemoryBookings(self.db.clone()))
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        Arc::new(InMemoryMessages(self.db.clone()))
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        Arc::new(InMemoryNotifications(self.db.clone()))
    }
}
