use crate::models::Company;
use crate::sql::SqlParam;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored job projection.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// List row: the job plus its company's display name.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

/// A job with the full projection of its owning company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Fields a PATCH may change. Neither id nor owning company can move.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    pub const COLUMNS: &'static [(&'static str, &'static str)] = &[];

    pub fn into_fields(self) -> Vec<(&'static str, SqlParam)> {
        let mut fields = Vec::new();
        if let Some(v) = self.title {
            fields.push(("title", SqlParam::from(v)));
        }
        if let Some(v) = self.salary {
            fields.push(("salary", SqlParam::from(v)));
        }
        if let Some(v) = self.equity {
            fields.push(("equity", SqlParam::from(v)));
        }
        fields
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
    pub title: Option<String>,
}
