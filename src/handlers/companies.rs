//! `/companies` handlers.

use crate::error::AppError;
use crate::extractors::{AdminUser, MaybeUser};
use crate::handlers::json_body;
use crate::models::{Company, CompanyDetail, CompanyFilter, CompanyUpdate, NewCompany};
use crate::response::{self, Reply};
use crate::schemas::{COMPANY_NEW, COMPANY_SEARCH, COMPANY_UPDATE};
use crate::service::{CompanyService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// POST /companies: admin only.
pub async fn create(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<Company>, AppError> {
    let new: NewCompany = RequestValidator::parse(json_body(payload)?, &COMPANY_NEW)?;
    let company = CompanyService::create(&state.pool, &new).await?;
    tracing::info!(handle = %company.handle, by = %caller.username, "company created");
    Ok(response::created("company", company))
}

/// GET /companies. Filters: minEmployees, maxEmployees, name.
pub async fn list(
    MaybeUser(caller): MaybeUser,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Reply<Vec<Company>>, AppError> {
    let query = RequestValidator::coerce_query(params, &COMPANY_SEARCH);
    let filter: CompanyFilter = RequestValidator::parse(query, &COMPANY_SEARCH)?;
    tracing::debug!(caller = ?caller.map(|c| c.username), ?filter, "list companies");
    let companies = CompanyService::find_all(&state.pool, &filter).await?;
    Ok(response::ok("companies", companies))
}

/// GET /companies/:handle: company with its jobs.
pub async fn read(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Reply<CompanyDetail>, AppError> {
    let company = CompanyService::get(&state.pool, &handle).await?;
    Ok(response::ok("company", company))
}

/// PATCH /companies/:handle: admin only.
pub async fn update(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<Company>, AppError> {
    let changes: CompanyUpdate = RequestValidator::parse(json_body(payload)?, &COMPANY_UPDATE)?;
    let company = CompanyService::update(&state.pool, &handle, changes).await?;
    tracing::info!(handle = %handle, by = %caller.username, "company updated");
    Ok(response::ok("company", company))
}

/// DELETE /companies/:handle: admin only.
pub async fn delete(
    AdminUser(caller): AdminUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Reply<String>, AppError> {
    CompanyService::remove(&state.pool, &handle).await?;
    tracing::info!(handle = %handle, by = %caller.username, "company deleted");
    Ok(response::deleted(handle))
}
