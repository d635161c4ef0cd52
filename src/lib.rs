//! Jobly: REST backend for companies and the jobs they post.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{Claims, TokenKeys};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::{CompanyService, JobService};
pub use settings::Settings;
pub use state::AppState;
pub use store::ensure_database_exists;
