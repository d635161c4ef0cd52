//! Request validation against static payload schemas.

use crate::error::AppError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Schema patterns compiled on first use.
static COMPILED: LazyLock<Mutex<HashMap<&'static str, Regex>>> = LazyLock::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = COMPILED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Constraints for one property. Built with const builder methods so schemas
/// can live in statics.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub pattern: Option<&'static str>,
    /// Only `uri` is recognised.
    pub format: Option<&'static str>,
}

impl FieldRule {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: false,
            min_length: None,
            max_length: None,
            minimum: None,
            pattern: None,
            format: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub const fn minimum(mut self, n: i64) -> Self {
        self.minimum = Some(n);
        self
    }

    pub const fn pattern(mut self, p: &'static str) -> Self {
        self.pattern = Some(p);
        self
    }

    pub const fn format(mut self, f: &'static str) -> Self {
        self.format = Some(f);
        self
    }
}

/// A closed object schema: properties not listed are rejected.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

impl Schema {
    fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check `payload` against `schema`, reporting every violation at once.
    pub fn validate<'a>(payload: &'a Value, schema: &Schema) -> Result<&'a Map<String, Value>, AppError> {
        let Value::Object(obj) = payload else {
            return Err(AppError::bad_request("instance is not of a type(s) object"));
        };
        let mut errors = Vec::new();
        for key in obj.keys() {
            if schema.field(key).is_none() {
                errors.push(format!("instance is not allowed to have the additional property \"{}\"", key));
            }
        }
        for rule in schema.fields {
            match obj.get(rule.name) {
                None if rule.required => errors.push(format!("instance requires property \"{}\"", rule.name)),
                None => {}
                Some(v) => validate_field(rule, v, &mut errors),
            }
        }
        if errors.is_empty() {
            Ok(obj)
        } else {
            tracing::debug!(schema = schema.name, ?errors, "payload rejected");
            Err(AppError::BadRequest(errors))
        }
    }

    /// Validate, then deserialize into the typed payload.
    pub fn parse<T: DeserializeOwned>(payload: Value, schema: &Schema) -> Result<T, AppError> {
        Self::validate(&payload, schema)?;
        serde_json::from_value(payload).map_err(|e| AppError::bad_request(e.to_string()))
    }

    /// Turn query-string pairs into a JSON object, giving integer and boolean
    /// properties their semantic type. A boolean is true only for `true`.
    /// Integers that do not parse stay strings so validation reports them.
    pub fn coerce_query(params: HashMap<String, String>, schema: &Schema) -> Value {
        let mut obj = Map::new();
        for (k, v) in params {
            let value = match schema.field(&k).map(|f| f.kind) {
                Some(FieldKind::Integer) => match v.trim().parse::<i64>() {
                    Ok(n) => Value::Number(n.into()),
                    Err(_) => Value::String(v),
                },
                Some(FieldKind::Boolean) => Value::Bool(v == "true"),
                _ => Value::String(v),
            };
            obj.insert(k, value);
        }
        Value::Object(obj)
    }
}

fn validate_field(rule: &FieldRule, v: &Value, errors: &mut Vec<String>) {
    let path = format!("instance.{}", rule.name);
    let type_ok = match rule.kind {
        FieldKind::String => v.is_string(),
        FieldKind::Integer => v.as_i64().is_some(),
        FieldKind::Boolean => v.is_boolean(),
    };
    if !type_ok {
        errors.push(format!("{} is not of a type(s) {}", path, rule.kind.name()));
        return;
    }

    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                errors.push(format!("{} does not meet minimum length of {}", path, min));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                errors.push(format!("{} does not meet maximum length of {}", path, max));
            }
        }
        if let Some(pattern) = rule.pattern {
            match compiled(pattern) {
                Ok(re) if re.is_match(s) => {}
                Ok(_) => errors.push(format!("{} does not match pattern \"{}\"", path, pattern)),
                Err(_) => errors.push(format!("invalid pattern for {}", rule.name)),
            }
        }
        if rule.format == Some("uri") && url::Url::parse(s).is_err() {
            errors.push(format!("{} does not conform to the \"uri\" format", path));
        }
    }

    if let Some(n) = v.as_i64() {
        if let Some(min) = rule.minimum {
            if n < min {
                errors.push(format!("{} must be greater than or equal to {}", path, min));
            }
        }
        if n > i64::from(i32::MAX) {
            errors.push(format!("{} must be less than or equal to {}", path, i32::MAX));
        }
    }
}
