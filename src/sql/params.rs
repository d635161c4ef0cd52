//! Typed bind values for PostgreSQL queries.

use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value bound to a positional placeholder. Each variant carries the SQL
/// type it binds as, so `NULL` still arrives with the column's type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(Some(v))
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(v: Option<String>) -> Self {
        SqlParam::Text(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlParam {
    fn from(v: Option<i32>) -> Self {
        SqlParam::Int(v)
    }
}

impl From<Decimal> for SqlParam {
    fn from(v: Decimal) -> Self {
        SqlParam::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for SqlParam {
    fn from(v: Option<Decimal>) -> Self {
        SqlParam::Decimal(v)
    }
}

/// Bind every param in order onto a `query_as`.
pub fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Text(v) => query.bind(v.as_deref()),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Decimal(v) => query.bind(*v),
        };
    }
    query
}
