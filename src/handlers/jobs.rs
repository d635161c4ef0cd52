//! `/jobs` handlers.

use crate::error::AppError;
use crate::extractors::{AdminUser, MaybeUser};
use crate::handlers::json_body;
use crate::models::{Job, JobDetail, JobFilter, JobListing, JobUpdate, NewJob};
use crate::response::{self, Reply};
use crate::schemas::{JOB_NEW, JOB_SEARCH, JOB_UPDATE};
use crate::service::{job_not_found, JobService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// A path segment that is not an integer names no job.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.parse().map_err(|_| job_not_found(id_str))
}

/// POST /jobs: admin only.
pub async fn create(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<Job>, AppError> {
    let new: NewJob = RequestValidator::parse(json_body(payload)?, &JOB_NEW)?;
    let job = JobService::create(&state.pool, &new).await?;
    tracing::info!(id = job.id, by = %caller.username, "job created");
    Ok(response::created("job", job))
}

/// GET /jobs. Filters: minSalary, hasEquity, title.
pub async fn list(
    MaybeUser(caller): MaybeUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Reply<Vec<JobListing>>, AppError> {
    let query = RequestValidator::coerce_query(params, &JOB_SEARCH);
    let filter: JobFilter = RequestValidator::parse(query, &JOB_SEARCH)?;
    tracing::debug!(caller = ?caller.map(|c| c.username), ?filter, "list jobs");
    let jobs = JobService::find_all(&state.pool, &filter).await?;
    Ok(response::ok("jobs", jobs))
}

/// GET /jobs/:id: job with its company.
pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<Reply<JobDetail>, AppError> {
    let id = parse_id(&id_str)?;
    let job = JobService::get(&state.pool, id).await?;
    Ok(response::ok("job", job))
}

/// PATCH /jobs/:id: admin only.
pub async fn update(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<Job>, AppError> {
    let changes: JobUpdate = RequestValidator::parse(json_body(payload)?, &JOB_UPDATE)?;
    let id = parse_id(&id_str)?;
    let job = JobService::update(&state.pool, id, changes).await?;
    tracing::info!(id, by = %caller.username, "job updated");
    Ok(response::ok("job", job))
}

/// DELETE /jobs/:id: admin only.
pub async fn delete(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Reply<i32>, AppError> {
    let id = parse_id(&id_str)?;
    JobService::remove(&state.pool, id).await?;
    tracing::info!(id, by = %caller.username, "job deleted");
    Ok(response::deleted(id))
}
