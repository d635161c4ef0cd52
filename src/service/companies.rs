//! Company data access.

use crate::error::AppError;
use crate::models::{Company, CompanyDetail, CompanyFilter, CompanyJob, CompanyUpdate, NewCompany};
use crate::service::db_error;
use crate::sql::{bind_params, sql_for_partial_update, QueryBuf};
use sqlx::PgPool;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyService;

impl CompanyService {
    /// Insert a company. A handle that is already taken is a bad request.
    pub async fn create(pool: &PgPool, new: &NewCompany) -> Result<Company, AppError> {
        let existing: Option<String> = sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
            .bind(&new.handle)
            .fetch_optional(pool)
            .await?;
        if existing.is_some() {
            return Err(duplicate(&new.handle));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPANY_COLUMNS
        );
        tracing::debug!(sql = %sql, handle = %new.handle, "query");
        sqlx::query_as::<_, Company>(&sql)
            .bind(&new.handle)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.num_employees)
            .bind(new.logo_url.as_deref())
            .fetch_one(pool)
            .await
            .map_err(|e| {
                let conflict = conflict(constraint_of(&e), &new.handle, Some(&new.name));
                db_error(e, || conflict)
            })
    }

    /// SELECT for `find_all`. Rejects a minimum above the maximum.
    pub fn list_query(filter: &CompanyFilter) -> Result<QueryBuf, AppError> {
        if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
            if min > max {
                return Err(AppError::bad_request("minEmployees cannot be greater than maxEmployees"));
            }
        }
        let mut q = QueryBuf::new(format!("SELECT {} FROM companies", COMPANY_COLUMNS));
        if let Some(min) = filter.min_employees {
            q.and_where("num_employees", ">=", min);
        }
        if let Some(max) = filter.max_employees {
            q.and_where("num_employees", "<=", max);
        }
        if let Some(name) = filter.name.as_deref() {
            q.and_contains("name", name);
        }
        Ok(q.finish("name"))
    }

    /// All companies matching every present filter, ordered by name.
    pub async fn find_all(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<Company>, AppError> {
        let q = Self::list_query(filter)?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query_as::<_, Company>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// One company with its jobs.
    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, AppError> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLUMNS);
        tracing::debug!(sql = %sql, handle = %handle, "query");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(handle))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Partial update; only supplied fields change.
    pub async fn update(pool: &PgPool, handle: &str, changes: CompanyUpdate) -> Result<Company, AppError> {
        let new_name = changes.name.clone();
        let update = sql_for_partial_update(changes.into_fields(), CompanyUpdate::COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            update.set_cols,
            update.next_placeholder(),
            COMPANY_COLUMNS
        );
        tracing::debug!(sql = %sql, params = ?update.values, handle = %handle, "query");
        bind_params(sqlx::query_as::<_, Company>(&sql), &update.values)
            .bind(handle)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                let conflict = conflict(constraint_of(&e), handle, new_name.as_deref());
                db_error(e, || conflict)
            })?
            .ok_or_else(|| not_found(handle))
    }

    /// Delete a company; its jobs go with it.
    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), AppError> {
        tracing::debug!(handle = %handle, "delete company");
        let deleted: Option<String> = sqlx::query_scalar("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?;
        deleted.map(|_| ()).ok_or_else(|| not_found(handle))
    }
}

fn duplicate(handle: &str) -> AppError {
    AppError::bad_request(format!("Duplicate company: {}", handle))
}

const NAME_UNIQUE: &str = "companies_name_key";

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    err.as_database_error().and_then(|d| d.constraint()).map(str::to_string)
}

/// Bad request for a violated constraint, naming the column that clashed.
fn conflict(constraint: Option<String>, handle: &str, name: Option<&str>) -> AppError {
    match (constraint.as_deref(), name) {
        (Some(NAME_UNIQUE), Some(name)) => AppError::bad_request(format!("Duplicate company name: {}", name)),
        (Some("companies_pkey"), _) => duplicate(handle),
        _ => AppError::bad_request(format!("company {} violates a constraint", handle)),
    }
}

fn not_found(handle: &str) -> AppError {
    AppError::NotFound(format!("No company: {}", handle))
}
