//! Service catalog entities: categories, services and search parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Grouping for services. Independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A service offered by one provider profile under one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub service_provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    /// Fixed-point amount; always strictly positive.
    pub price: Decimal,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service creation data transfer object. The owning provider profile is
/// resolved from the request context.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateService {
    /// Category the service is classified under
    pub category_id: Uuid,
    /// Short service title
    #[schema(example = "Kitchen sink repair")]
    pub title: String,
    /// Full description
    #[serde(default)]
    pub description: String,
    /// Price (strictly positive, two decimal places)
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    /// Where the service is delivered
    #[serde(default)]
    pub location: String,
}

/// Fields required to persist a new service.
#[derive(Debug, Clone)]
pub struct NewService {
    pub service_provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub location: String,
}

/// Substring filters for service search. All filters are conjunctive.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ServiceFilter {
    /// Substring of the service title
    pub title: Option<String>,
    /// Substring of the service description
    pub description: Option<String>,
    /// Substring of the service location
    pub location: Option<String>,
    /// Substring of the category name
    pub category: Option<String>,
}

/// Orderings supported by service search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrder {
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
}

/// Service response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub service_provider_id: Uuid,
    pub category_id: Uuid,
    #[schema(example = "Kitchen sink repair")]
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            service_provider_id: service.service_provider_id,
            category_id: service.category_id,
            title: service.title,
            description: service.description,
            price: service.price,
            location: service.location,
            is_active: service.is_active,
            created_at: service.created_at,
        }
    }
}

/// Category response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Plumbing")]
    pub name: String,
    pub description: String,
}

impl From<ServiceCategory> for CategoryResponse {
    fn from(category: ServiceCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}
