//! Provider profile service tests: user-type constraint, experience sign.

mod common;

use profinder::domain::{CreateProviderProfile, UpdateProviderProfile, UserType};
use profinder::errors::AppError;
use profinder::services::{ProviderManager, ProviderService};

use common::{InMemoryDb, TestUow};

fn profile_request() -> CreateProviderProfile {
    CreateProviderProfile {
        profession: "Electrician".to_string(),
        location: "Lyon".to_string(),
        description: "Residential wiring".to_string(),
        experience: 5,
    }
}

#[tokio::test]
async fn profile_for_client_user_is_rejected() {
    let db = InMemoryDb::new();
    let client = db.seed_user(UserType::Client, "client@example.com");

    let service = ProviderManager::new(TestUow::new(db));
    let result = service.create_profile(client.id, profile_request()).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::InvalidUserType("service_provider")
    ));
}

#[tokio::test]
async fn profile_for_provider_user_succeeds_with_default_rating() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");

    let service = ProviderManager::new(TestUow::new(db));
    let profile = service
        .create_profile(provider.id, profile_request())
        .await
        .unwrap();

    assert_eq!(profile.user_id, provider.id);
    assert_eq!(profile.experience, 5);
    assert_eq!(profile.rating, 0.0);
}

#[tokio::test]
async fn profile_for_unknown_user_is_not_found() {
    let db = InMemoryDb::new();
    let service = ProviderManager::new(TestUow::new(db));

    let result = service
        .create_profile(uuid::Uuid::new_v4(), profile_request())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn negative_experience_is_rejected_on_create_and_update() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");

    let service = ProviderManager::new(TestUow::new(db));

    let mut request = profile_request();
    request.experience = -1;
    let result = service.create_profile(provider.id, request).await;
    assert!(matches!(result.unwrap_err(), AppError::NegativeExperience));

    let profile = service
        .create_profile(provider.id, profile_request())
        .await
        .unwrap();

    let result = service
        .update_profile(
            profile.id,
            UpdateProviderProfile {
                experience: Some(-3),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NegativeExperience));
}

#[tokio::test]
async fn second_profile_for_same_user_conflicts() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");

    let service = ProviderManager::new(TestUow::new(db));
    service
        .create_profile(provider.id, profile_request())
        .await
        .unwrap();

    let result = service.create_profile(provider.id, profile_request()).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn set_rating_overwrites_the_externally_computed_value() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");

    let service = ProviderManager::new(TestUow::new(db));
    let profile = service
        .create_profile(provider.id, profile_request())
        .await
        .unwrap();

    let updated = service.set_rating(profile.id, 4.5).await.unwrap();
    assert_eq!(updated.rating, 4.5);

    let fetched = service.get_profile(profile.id).await.unwrap();
    assert_eq!(fetched.rating, 4.5);
}

#[tokio::test]
async fn get_profile_for_user_resolves_ownership() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let other = db.seed_user(UserType::ServiceProvider, "other@example.com");

    let service = ProviderManager::new(TestUow::new(db));
    let profile = service
        .create_profile(provider.id, profile_request())
        .await
        .unwrap();

    let found = service.get_profile_for_user(provider.id).await.unwrap();
    assert_eq!(found.id, profile.id);

    let result = service.get_profile_for_user(other.id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
