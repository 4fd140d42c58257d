//! ProFinder - a marketplace API connecting clients with service providers.
//!
//! Accounts, provider profiles, a service catalog, a booking ledger and a
//! messaging/notification log over a relational store, exposed through a
//! REST API.
//!
//! # Layout
//!
//! - [`domain`] - entities, closed enums and value objects
//! - [`services`] - use cases; every data-model invariant is enforced here
//! - [`infra`] - SeaORM entities, repositories, migrations, mail boundary
//! - [`api`] - axum handlers, middleware, routes and the OpenAPI document
//! - [`cli`] / [`commands`] - the `serve` and `migrate` entry points
//! - [`config`], [`errors`], [`types`] - settings, the error taxonomy and
//!   shared response types
//!
//! Run `profinder serve` to start the API, `profinder migrate up` to apply
//! the schema.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Booking, BookingStatus, Password, Service, User, UserType};
pub use errors::{AppError, AppResult};
