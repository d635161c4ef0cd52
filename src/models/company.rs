use crate::sql::SqlParam;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored company projection.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company with the jobs it owns, ordered by job id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// Job as listed under its owning company.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Fields a PATCH may change. The handle is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    /// Application field name to column name, for fields whose names differ.
    pub const COLUMNS: &'static [(&'static str, &'static str)] =
        &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

    /// Supplied fields only, keyed by their JSON names.
    pub fn into_fields(self) -> Vec<(&'static str, SqlParam)> {
        let mut fields = Vec::new();
        if let Some(v) = self.name {
            fields.push(("name", SqlParam::from(v)));
        }
        if let Some(v) = self.description {
            fields.push(("description", SqlParam::from(v)));
        }
        if let Some(v) = self.num_employees {
            fields.push(("numEmployees", SqlParam::from(v)));
        }
        if let Some(v) = self.logo_url {
            fields.push(("logoUrl", SqlParam::from(v)));
        }
        fields
    }
}

/// Optional list filters; all present filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
    pub name: Option<String>,
}
