//! Data access for companies and jobs, plus request validation.

mod companies;
mod jobs;
mod validation;
pub use companies::CompanyService;
pub use jobs::JobService;
pub(crate) use jobs::not_found as job_not_found;
pub use validation::{FieldKind, FieldRule, RequestValidator, Schema};

use crate::error::AppError;
use sqlx::error::ErrorKind;

/// Turn constraint violations into a caller-supplied bad request; anything
/// else stays a database error.
pub(crate) fn db_error(err: sqlx::Error, on_violation: impl FnOnce() -> AppError) -> AppError {
    let violated = err.as_database_error().map(|d| d.kind()).is_some_and(|kind| {
        matches!(
            kind,
            ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation | ErrorKind::CheckViolation
        )
    });
    if violated {
        tracing::debug!(error = %err, "constraint violation");
        on_violation()
    } else {
        AppError::Db(err)
    }
}
