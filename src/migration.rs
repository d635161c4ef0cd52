//! Schema DDL for companies and jobs. Idempotent.

use crate::error::AppError;
use sqlx::PgPool;

const DDL: &[(&str, &str)] = &[
    (
        "companies",
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            handle VARCHAR(25) PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            num_employees INTEGER CHECK (num_employees >= 0),
            description TEXT NOT NULL,
            logo_url TEXT
        )
        "#,
    ),
    (
        "jobs",
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            salary INTEGER CHECK (salary >= 0),
            equity NUMERIC CHECK (equity <= 1.0),
            company_handle VARCHAR(25) NOT NULL
                REFERENCES companies ON DELETE CASCADE
        )
        "#,
    ),
    (
        "jobs_company_handle_idx",
        "CREATE INDEX IF NOT EXISTS jobs_company_handle_idx ON jobs (company_handle)",
    ),
];

/// Create the tables this service needs. Safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (name, sql) in DDL {
        tracing::debug!(object = *name, "applying DDL");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(objects = DDL.len(), "schema ready");
    Ok(())
}
