//! Resource routes and the full application router.

use crate::handlers::{companies, jobs};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(companies::list).post(companies::create))
        .route(
            "/:handle",
            get(companies::read).patch(companies::update).delete(companies::delete),
        )
}

pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list).post(jobs::create))
        .route("/:id", get(jobs::read).patch(jobs::update).delete(jobs::delete))
}

/// Everything the server mounts: `/companies`, `/jobs` and the common routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/companies", company_routes())
        .nest("/jobs", job_routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
