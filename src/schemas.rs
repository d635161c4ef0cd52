//! Payload schemas for every request body and list query.

use crate::service::{FieldRule, Schema};

const HANDLE_MAX: usize = 25;
const EQUITY_PATTERN: &str = r"^(0(\.\d+)?|1(\.0+)?)$";

pub static COMPANY_NEW: Schema = Schema {
    name: "companyNew",
    fields: &[
        FieldRule::string("handle").required().min_length(1).max_length(HANDLE_MAX),
        FieldRule::string("name").required().min_length(1),
        FieldRule::string("description").required(),
        FieldRule::integer("numEmployees").minimum(0),
        FieldRule::string("logoUrl").format("uri"),
    ],
};

pub static COMPANY_UPDATE: Schema = Schema {
    name: "companyUpdate",
    fields: &[
        FieldRule::string("name").min_length(1),
        FieldRule::string("description"),
        FieldRule::integer("numEmployees").minimum(0),
        FieldRule::string("logoUrl").format("uri"),
    ],
};

pub static COMPANY_SEARCH: Schema = Schema {
    name: "companySearch",
    fields: &[
        FieldRule::integer("minEmployees").minimum(0),
        FieldRule::integer("maxEmployees").minimum(0),
        FieldRule::string("name").min_length(1),
    ],
};

pub static JOB_NEW: Schema = Schema {
    name: "jobNew",
    fields: &[
        FieldRule::string("title").required().min_length(1),
        FieldRule::integer("salary").minimum(0),
        FieldRule::string("equity").pattern(EQUITY_PATTERN),
        FieldRule::string("companyHandle").required().min_length(1).max_length(HANDLE_MAX),
    ],
};

pub static JOB_UPDATE: Schema = Schema {
    name: "jobUpdate",
    fields: &[
        FieldRule::string("title").min_length(1),
        FieldRule::integer("salary").minimum(0),
        FieldRule::string("equity").pattern(EQUITY_PATTERN),
    ],
};

pub static JOB_SEARCH: Schema = Schema {
    name: "jobSearch",
    fields: &[
        FieldRule::integer("minSalary").minimum(0),
        FieldRule::boolean("hasEquity"),
        FieldRule::string("title").min_length(1),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyUpdate, JobUpdate, NewCompany, NewJob};
    use crate::service::RequestValidator;
    use serde_json::json;

    #[test]
    fn new_job_parses_equity_as_decimal() {
        let job: NewJob = RequestValidator::parse(
            json!({"title": "newJob", "salary": 1000, "equity": "0.2", "companyHandle": "c1"}),
            &JOB_NEW,
        )
        .unwrap();
        assert_eq!(job.equity.map(|d| d.to_string()), Some("0.2".to_string()));
    }

    #[test]
    fn new_job_rejects_string_salary_and_missing_fields() {
        let bad = json!({"title": "newJob", "salary": "1000", "equity": "0.2", "companyHandle": "c1"});
        assert!(RequestValidator::parse::<NewJob>(bad, &JOB_NEW).is_err());
        assert!(RequestValidator::parse::<NewJob>(json!({"companyHandle": "c1"}), &JOB_NEW).is_err());
    }

    #[test]
    fn equity_above_one_is_rejected() {
        let bad = json!({"equity": "1.5"});
        assert!(RequestValidator::validate(&bad, &JOB_UPDATE).is_err());
        assert!(RequestValidator::validate(&json!({"equity": "1.0"}), &JOB_UPDATE).is_ok());
        assert!(RequestValidator::validate(&json!({"equity": "0"}), &JOB_UPDATE).is_ok());
    }

    #[test]
    fn updates_cannot_touch_keys() {
        assert!(RequestValidator::parse::<CompanyUpdate>(json!({"handle": "new"}), &COMPANY_UPDATE).is_err());
        assert!(RequestValidator::parse::<JobUpdate>(json!({"companyHandle": "c2"}), &JOB_UPDATE).is_err());
        assert!(RequestValidator::parse::<JobUpdate>(json!({"id": 3}), &JOB_UPDATE).is_err());
    }

    #[test]
    fn new_company_requires_handle_name_description() {
        let ok: NewCompany = RequestValidator::parse(
            json!({"handle": "new", "name": "New", "description": "DescNew", "numEmployees": 10, "logoUrl": "http://new.img"}),
            &COMPANY_NEW,
        )
        .unwrap();
        assert_eq!(ok.num_employees, Some(10));
        assert!(RequestValidator::parse::<NewCompany>(json!({"handle": "new", "numEmployees": 10}), &COMPANY_NEW).is_err());
    }

    #[test]
    fn search_schemas_are_closed() {
        let q = json!({"minSalary": 2, "random": "nonsense"});
        assert!(RequestValidator::validate(&q, &JOB_SEARCH).is_err());
        let q = json!({"minEmployees": 1, "nameLike": "c"});
        assert!(RequestValidator::validate(&q, &COMPANY_SEARCH).is_err());
    }
}
