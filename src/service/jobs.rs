//! Job data access.

use crate::error::AppError;
use crate::models::{Company, Job, JobDetail, JobFilter, JobListing, JobUpdate, NewJob};
use crate::service::db_error;
use crate::sql::{bind_params, sql_for_partial_update, QueryBuf};
use sqlx::PgPool;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

const LIST_SELECT: &str = "SELECT jobs.id, jobs.title, jobs.salary, jobs.equity, jobs.company_handle, \
     companies.name AS company_name \
     FROM jobs LEFT JOIN companies ON companies.handle = jobs.company_handle";

pub struct JobService;

impl JobService {
    /// Insert a job. The owning company must exist.
    pub async fn create(pool: &PgPool, new: &NewJob) -> Result<Job, AppError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {}",
            JOB_COLUMNS
        );
        tracing::debug!(sql = %sql, company_handle = %new.company_handle, "query");
        sqlx::query_as::<_, Job>(&sql)
            .bind(&new.title)
            .bind(new.salary)
            .bind(new.equity)
            .bind(&new.company_handle)
            .fetch_one(pool)
            .await
            .map_err(|e| db_error(e, || AppError::bad_request(format!("No company: {}", new.company_handle))))
    }

    /// SELECT for `find_all`.
    pub fn list_query(filter: &JobFilter) -> QueryBuf {
        let mut q = QueryBuf::new(LIST_SELECT);
        if let Some(min) = filter.min_salary {
            q.and_where("jobs.salary", ">=", min);
        }
        if filter.has_equity == Some(true) {
            q.and_where_raw("jobs.equity > 0");
        }
        if let Some(title) = filter.title.as_deref() {
            q.and_contains("jobs.title", title);
        }
        q.finish("jobs.title, jobs.id")
    }

    /// All jobs matching every present filter, ordered by title.
    pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobListing>, AppError> {
        let q = Self::list_query(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query_as::<_, JobListing>(&q.sql), &q.params)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// One job with its owning company nested.
    pub async fn get(pool: &PgPool, id: i32) -> Result<JobDetail, AppError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        let company = sqlx::query_as::<_, Company>(
            "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1",
        )
        .bind(&job.company_handle)
        .fetch_optional(pool)
        .await?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Partial update over title, salary and equity.
    pub async fn update(pool: &PgPool, id: i32, changes: JobUpdate) -> Result<Job, AppError> {
        let update = sql_for_partial_update(changes.into_fields(), JobUpdate::COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            update.set_cols,
            update.next_placeholder(),
            JOB_COLUMNS
        );
        tracing::debug!(sql = %sql, params = ?update.values, id, "query");
        bind_params(sqlx::query_as::<_, Job>(&sql), &update.values)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| db_error(e, || AppError::bad_request("job update violates a constraint")))?
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
        tracing::debug!(id, "delete job");
        let deleted: Option<i32> = sqlx::query_scalar("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        deleted.map(|_| ()).ok_or_else(|| not_found(id))
    }
}

pub(crate) fn not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("No job: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn unfiltered_list_joins_company_name() {
        let q = JobService::list_query(&JobFilter::default());
        assert!(q.sql.contains("LEFT JOIN companies ON companies.handle = jobs.company_handle"));
        assert!(q.sql.ends_with("jobs.company_handle ORDER BY jobs.title, jobs.id"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn salary_and_title_compose() {
        let filter = JobFilter {
            min_salary: Some(200),
            has_equity: None,
            title: Some("3".into()),
        };
        let q = JobService::list_query(&filter);
        assert!(q.sql.contains("WHERE jobs.salary >= $1 AND jobs.title ILIKE $2 ORDER BY"));
        assert_eq!(q.params, vec![SqlParam::from(200), SqlParam::from("%3%")]);
    }

    #[test]
    fn equity_flag_adds_unparameterized_condition() {
        let filter = JobFilter {
            min_salary: Some(180),
            has_equity: Some(true),
            title: None,
        };
        let q = JobService::list_query(&filter);
        assert!(q.sql.contains("WHERE jobs.salary >= $1 AND jobs.equity > 0 ORDER BY"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn equity_false_does_not_filter() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        let q = JobService::list_query(&filter);
        assert!(!q.sql.contains("WHERE"));
    }
}
