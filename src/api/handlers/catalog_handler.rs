//! Catalog handlers: categories and service listings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    CategoryResponse, CreateService, ServiceFilter, ServiceOrder, ServiceResponse,
};
use crate::errors::{AppError, AppResult};
use crate::types::{NoContent, Paginated, PaginationParams};

/// Category creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    #[schema(example = "Plumbing")]
    pub name: String,
    /// Category description
    #[serde(default)]
    pub description: String,
}

/// Category update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    /// New name
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
}

/// Service creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    /// Category the service is classified under
    pub category_id: Uuid,
    /// Short service title
    #[validate(length(min = 1, message = "Title is required"))]
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

/// Service activation toggle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetActiveRequest {
    /// Whether the service accepts bookings
    pub is_active: bool,
}

/// Service search query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ServiceSearchQuery {
    /// Substring of the service title
    pub title: Option<String>,
    /// Substring of the service description
    pub description: Option<String>,
    /// Substring of the service location
    pub location: Option<String>,
    /// Substring of the category name
    pub category: Option<String>,
    /// Ordering: price_asc, price_desc, rating_asc or rating_desc
    pub order_by: Option<ServiceOrder>,
    /// Page number (1-indexed)
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

/// Create category routes (all require authentication)
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// Create service routes (all require authentication)
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_services).post(create_service))
        .route("/:id", get(get_service).delete(delete_service))
        .route("/:id/active", patch(set_service_active))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state
        .catalog_service
        .create_category(payload.name, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Categories", body = [CategoryResponse]))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.catalog_service.get_category(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state
        .catalog_service
        .update_category(id, payload.name, payload.description)
        .await?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Delete a category, its services and their bookings
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.catalog_service.delete_category(id).await?;
    Ok(NoContent)
}

/// Create a service under the authenticated provider's profile
#[utoipa::path(
    post,
    path = "/services",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 400, description = "Validation error or non-positive price"),
        (status = 404, description = "Profile or category not found")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceResponse>)> {
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await?;

    let service = state
        .catalog_service
        .create_service(
            profile.id,
            CreateService {
                category_id: payload.category_id,
                title: payload.title,
                description: payload.description,
                price: payload.price,
                location: payload.location,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

/// Search services with substring filters and optional ordering
#[utoipa::path(
    get,
    path = "/services",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(ServiceSearchQuery),
    responses((status = 200, description = "Matching services"))
)]
pub async fn search_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceSearchQuery>,
) -> AppResult<Json<Paginated<ServiceResponse>>> {
    let mut page = PaginationParams::default();
    if let Some(number) = query.page {
        page.page = number.max(1);
    }
    if let Some(per_page) = query.per_page {
        page.per_page = per_page;
    }

    let filter = ServiceFilter {
        title: query.title,
        description: query.description,
        location: query.location,
        category: query.category,
    };

    let (services, total) = state
        .catalog_service
        .search_services(filter, query.order_by, page.clone())
        .await?;

    Ok(Json(Paginated::from_page(
        services.into_iter().map(ServiceResponse::from).collect(),
        &page,
        total,
    )))
}

/// Get a service by id
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ServiceResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceResponse>> {
    let service = state.catalog_service.get_service(id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// Toggle whether a service accepts bookings (owner only)
#[utoipa::path(
    patch,
    path = "/services/{id}/active",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated service", body = ServiceResponse),
        (status = 403, description = "Not the owning provider"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn set_service_active(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetActiveRequest>,
) -> AppResult<Json<ServiceResponse>> {
    require_service_owner(&state, &current_user, id).await?;

    let service = state
        .catalog_service
        .set_service_active(id, payload.is_active)
        .await?;

    Ok(Json(ServiceResponse::from(service)))
}

/// Delete a service and its bookings (owner only)
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 403, description = "Not the owning provider"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_service_owner(&state, &current_user, id).await?;

    state.catalog_service.delete_service(id).await?;
    Ok(NoContent)
}

/// Only the provider owning a service may mutate it.
async fn require_service_owner(
    state: &AppState,
    current_user: &CurrentUser,
    service_id: Uuid,
) -> AppResult<()> {
    let service = state.catalog_service.get_service(service_id).await?;
    let profile = state
        .provider_service
        .get_profile_for_user(current_user.id)
        .await
        .map_err(|_| AppError::Forbidden)?;

    if service.service_provider_id != profile.id {
        return Err(AppError::Forbidden);
    }

    Ok(())
}
