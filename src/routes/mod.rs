//! Router assembly.

mod api;
mod common;
pub use api::{app, company_routes, job_routes};
pub use common::common_routes;
