//! Catalog service tests: price validation, reference resolution, search.

mod common;

use rust_decimal::Decimal;
use uuid::Uuid;

use profinder::domain::{CreateService, ServiceFilter, ServiceOrder, UserType};
use profinder::errors::AppError;
use profinder::services::{CatalogManager, CatalogService};
use profinder::types::PaginationParams;

use common::{InMemoryDb, TestUow};

fn service_request(category_id: Uuid, price: Decimal) -> CreateService {
    CreateService {
        category_id,
        title: "Sink repair".to_string(),
        description: "Fix leaking sinks".to_string(),
        price,
        location: "Paris".to_string(),
    }
}

#[tokio::test]
async fn category_name_must_not_be_empty() {
    let db = InMemoryDb::new();
    let service = CatalogManager::new(TestUow::new(db));

    let result = service
        .create_category("   ".to_string(), String::new())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

    let category = service
        .create_category("Plumbing".to_string(), "Water things".to_string())
        .await
        .unwrap();

    let result = service
        .update_category(category.id, Some(String::new()), None)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn non_positive_price_is_rejected() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let profile = db.seed_profile(provider.id);
    let category = db.seed_category("Plumbing");

    let service = CatalogManager::new(TestUow::new(db));

    for price in [Decimal::ZERO, Decimal::new(-100, 2)] {
        let result = service
            .create_service(profile.id, service_request(category.id, price))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::InvalidPrice));
    }

    // One cent is the smallest valid price
    let created = service
        .create_service(profile.id, service_request(category.id, Decimal::new(1, 2)))
        .await
        .unwrap();
    assert_eq!(created.price, Decimal::new(1, 2));
    assert!(created.is_active);
}

#[tokio::test]
async fn unresolved_references_are_not_found() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let profile = db.seed_profile(provider.id);
    let category = db.seed_category("Plumbing");

    let service = CatalogManager::new(TestUow::new(db));

    let result = service
        .create_service(
            Uuid::new_v4(),
            service_request(category.id, Decimal::new(4990, 2)),
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));

    let result = service
        .create_service(
            profile.id,
            service_request(Uuid::new_v4(), Decimal::new(4990, 2)),
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn search_matches_substrings_across_fields() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let profile = db.seed_profile(provider.id);
    let plumbing = db.seed_category("Plumbing");
    let gardening = db.seed_category("Gardening");

    db.seed_service(profile.id, plumbing.id, "Sink repair", Decimal::new(4000, 2));
    db.seed_service(profile.id, plumbing.id, "Pipe installation", Decimal::new(9000, 2));
    db.seed_service(profile.id, gardening.id, "Hedge trimming", Decimal::new(3000, 2));

    let service = CatalogManager::new(TestUow::new(db));

    let (matches, total) = service
        .search_services(
            ServiceFilter {
                title: Some("repair".to_string()),
                ..Default::default()
            },
            None,
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].title, "Sink repair");

    let (matches, total) = service
        .search_services(
            ServiceFilter {
                category: Some("Plumb".to_string()),
                ..Default::default()
            },
            None,
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert!(matches.iter().all(|s| s.category_id == plumbing.id));
}

#[tokio::test]
async fn search_orders_by_price_and_rating() {
    let db = InMemoryDb::new();
    let cheap_provider = db.seed_user(UserType::ServiceProvider, "cheap@example.com");
    let pricey_provider = db.seed_user(UserType::ServiceProvider, "pricey@example.com");
    let cheap_profile = db.seed_profile(cheap_provider.id);
    let pricey_profile = db.seed_profile(pricey_provider.id);
    let category = db.seed_category("Plumbing");

    db.seed_service(cheap_profile.id, category.id, "Budget fix", Decimal::new(2000, 2));
    db.seed_service(pricey_profile.id, category.id, "Premium fix", Decimal::new(8000, 2));

    // Only the pricey provider has a rating so far
    db.profiles
        .lock()
        .unwrap()
        .iter_mut()
        .find(|p| p.id == pricey_profile.id)
        .unwrap()
        .rating = 4.8;

    let service = CatalogManager::new(TestUow::new(db));

    let (by_price, _) = service
        .search_services(
            ServiceFilter::default(),
            Some(ServiceOrder::PriceAsc),
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_price[0].title, "Budget fix");

    let (by_price_desc, _) = service
        .search_services(
            ServiceFilter::default(),
            Some(ServiceOrder::PriceDesc),
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_price_desc[0].title, "Premium fix");

    let (by_rating, _) = service
        .search_services(
            ServiceFilter::default(),
            Some(ServiceOrder::RatingDesc),
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_rating[0].title, "Premium fix");
}

#[tokio::test]
async fn toggling_service_activity() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let profile = db.seed_profile(provider.id);
    let category = db.seed_category("Plumbing");
    let listed = db.seed_service(profile.id, category.id, "Sink repair", Decimal::new(4990, 2));

    let service = CatalogManager::new(TestUow::new(db));

    let updated = service.set_service_active(listed.id, false).await.unwrap();
    assert!(!updated.is_active);

    let updated = service.set_service_active(listed.id, true).await.unwrap();
    assert!(updated.is_active);
}

#[tokio::test]
async fn deleting_category_cascades_to_services_and_bookings() {
    let db = InMemoryDb::new();
    let provider = db.seed_user(UserType::ServiceProvider, "pro@example.com");
    let client = db.seed_user(UserType::Client, "client@example.com");
    let profile = db.seed_profile(provider.id);
    let category = db.seed_category("Plumbing");
    let listed = db.seed_service(profile.id, category.id, "Sink repair", Decimal::new(4990, 2));

    db.bookings.lock().unwrap().push(profinder::domain::Booking {
        id: Uuid::new_v4(),
        client_id: client.id,
        service_id: listed.id,
        service_provider_id: profile.id,
        booking_date: common::tomorrow(),
        status: profinder::domain::BookingStatus::Pending,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    });

    let service = CatalogManager::new(TestUow::new(db.clone()));
    service.delete_category(category.id).await.unwrap();

    assert!(db.categories.lock().unwrap().is_empty());
    assert!(db.services.lock().unwrap().is_empty());
    assert!(db.bookings.lock().unwrap().is_empty());
}
