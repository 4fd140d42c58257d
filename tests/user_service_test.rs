//! User service tests: email uniqueness, phone validation, cascade delete.

mod common;

use rust_decimal::Decimal;

use profinder::domain::{CreateUser, UpdateUser, UserType};
use profinder::errors::AppError;
use profinder::services::{UserManager, UserService};

use common::{tomorrow, InMemoryDb, TestUow};

fn create_request(email: &str, user_type: UserType) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: "SecurePass123!".to_string(),
        user_type,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone_number: None,
        address: "1 Main Street".to_string(),
    }
}

#[tokio::test]
async fn create_user_succeeds_and_hashes_password() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    let user = service
        .create_user(create_request("jane@example.com", UserType::Client))
        .await
        .unwrap();

    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.user_type, UserType::Client);
    assert_ne!(user.password_hash, "SecurePass123!");
}

#[tokio::test]
async fn distinct_emails_succeed_duplicate_fails() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    service
        .create_user(create_request("first@example.com", UserType::Client))
        .await
        .unwrap();
    service
        .create_user(create_request("second@example.com", UserType::Client))
        .await
        .unwrap();

    let result = service
        .create_user(create_request("first@example.com", UserType::ServiceProvider))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::DuplicateEmail));
}

#[tokio::test]
async fn invalid_phone_rejected_on_creation() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    for phone in ["1234567", "not-a-number", "+123456789012345678"] {
        let mut request = create_request("phone@example.com", UserType::Client);
        request.phone_number = Some(phone.to_string());

        let result = service.create_user(request).await;
        assert!(
            matches!(result.unwrap_err(), AppError::InvalidPhoneFormat),
            "{phone} should be rejected"
        );
    }
}

#[tokio::test]
async fn valid_phone_accepted_on_creation() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    let mut request = create_request("phone@example.com", UserType::Client);
    request.phone_number = Some("+33612345678".to_string());

    let user = service.create_user(request).await.unwrap();
    assert_eq!(user.phone_number.as_deref(), Some("+33612345678"));
}

#[tokio::test]
async fn update_revalidates_phone_and_email() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    let first = service
        .create_user(create_request("first@example.com", UserType::Client))
        .await
        .unwrap();
    service
        .create_user(create_request("second@example.com", UserType::Client))
        .await
        .unwrap();

    let result = service
        .update_user(
            first.id,
            UpdateUser {
                phone_number: Some("bad".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidPhoneFormat));

    let result = service
        .update_user(
            first.id,
            UpdateUser {
                email: Some("second@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::DuplicateEmail));

    // Re-submitting the current email is not a conflict
    let updated = service
        .update_user(
            first.id,
            UpdateUser {
                email: Some("first@example.com".to_string()),
                first_name: Some("Janet".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Janet");
}

#[tokio::test]
async fn list_users_filters_by_type() {
    let db = InMemoryDb::new();
    db.seed_user(UserType::Client, "c1@example.com");
    db.seed_user(UserType::Client, "c2@example.com");
    db.seed_user(UserType::ServiceProvider, "p1@example.com");

    let service = UserManager::new(TestUow::new(db));

    assert_eq!(service.list_users(None).await.unwrap().len(), 3);
    assert_eq!(
        service
            .list_users(Some(UserType::Client))
            .await
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        service
            .list_users(Some(UserType::ServiceProvider))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn get_user_not_found() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    let result = service.get_user(uuid::Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn deleting_provider_removes_profile_services_and_bookings() {
    let db = InMemoryDb::new();

    let provider = db.seed_user(UserType::ServiceProvider, "provider@example.com");
    let client = db.seed_user(UserType::Client, "client@example.com");
    let profile = db.seed_profile(provider.id);
    let category = db.seed_category("Plumbing");
    let service_row = db.seed_service(profile.id, category.id, "Sink repair", Decimal::new(4990, 2));

    // A booking against the provider's service, and messages both ways
    db.bookings.lock().unwrap().push(profinder::domain::Booking {
        id: uuid::Uuid::new_v4(),
        client_id: client.id,
        service_id: service_row.id,
        service_provider_id: profile.id,
        booking_date: tomorrow(),
        status: profinder::domain::BookingStatus::Pending,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    });
    db.seed_message(client.id, provider.id, "hello", chrono::Utc::now());
    db.seed_notification(provider.id, false);

    let uow = TestUow::new(db.clone());
    let service = UserManager::new(uow);

    service.delete_user(provider.id).await.unwrap();

    // No orphaned rows remain anywhere in the graph
    assert!(db.users.lock().unwrap().iter().all(|u| u.id != provider.id));
    assert!(db.profiles.lock().unwrap().is_empty());
    assert!(db.services.lock().unwrap().is_empty());
    assert!(db.bookings.lock().unwrap().is_empty());
    assert!(db.messages.lock().unwrap().is_empty());
    assert!(db.notifications.lock().unwrap().is_empty());

    // The unrelated client account survives
    assert_eq!(db.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_unknown_user_is_not_found() {
    let db = InMemoryDb::new();
    let service = UserManager::new(TestUow::new(db));

    let result = service.delete_user(uuid::Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
