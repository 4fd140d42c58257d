//! HTTP surface: handlers, JWT middleware, extractors, routes and the
//! OpenAPI document. Handlers delegate straight to the services.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
