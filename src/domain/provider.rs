//! Service provider profile entity and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One-to-one extension of a `service_provider` User.
///
/// The user-type constraint cannot be expressed in the schema; the
/// creating operation validates it and rejects mismatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProviderProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profession: String,
    pub location: String,
    pub description: String,
    pub experience: i32,
    /// Externally computed; only `set_rating` writes it. Defaults to 0.0.
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provider profile creation data transfer object. The owning user is
/// taken from the request context, never from the body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProviderProfile {
    /// Profession exercised by the provider
    #[schema(example = "Electrician")]
    pub profession: String,
    /// Where the provider operates
    #[schema(example = "Lyon")]
    pub location: String,
    /// Description of the services offered
    #[serde(default)]
    pub description: String,
    /// Years of experience (must not be negative)
    #[serde(default)]
    pub experience: i32,
}

/// Fields required to persist a new provider profile.
#[derive(Debug, Clone)]
pub struct NewProviderProfile {
    pub user_id: Uuid,
    pub profession: String,
    pub location: String,
    pub description: String,
    pub experience: i32,
}

/// Partial update applied to an existing profile.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProviderProfile {
    /// New profession
    #[schema(example = "Electrician")]
    pub profession: Option<String>,
    /// New location
    #[schema(example = "Lyon")]
    pub location: Option<String>,
    /// New description of the services offered
    pub description: Option<String>,
    /// Years of experience (must not be negative)
    pub experience: Option<i32>,
}

/// Provider profile response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Electrician")]
    pub profession: String,
    #[schema(example = "Lyon")]
    pub location: String,
    pub description: String,
    pub experience: i32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceProviderProfile> for ProviderProfileResponse {
    fn from(profile: ServiceProviderProfile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            profession: profile.profession,
            location: profile.location,
            description: profile.description,
            experience: profile.experience,
            rating: profile.rating,
            created_at: profile.created_at,
        }
    }
}
