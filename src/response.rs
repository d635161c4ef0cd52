//! Response envelopes: every body is a one-key object such as `{"company": ...}`.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Serializes as `{ <key>: <value> }`.
#[derive(Debug)]
pub struct Named<T> {
    pub key: &'static str,
    pub value: T,
}

impl<T: Serialize> Serialize for Named<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

pub type Reply<T> = (StatusCode, Json<Named<T>>);

pub fn ok<T: Serialize>(key: &'static str, value: T) -> Reply<T> {
    (StatusCode::OK, Json(Named { key, value }))
}

pub fn created<T: Serialize>(key: &'static str, value: T) -> Reply<T> {
    (StatusCode::CREATED, Json(Named { key, value }))
}

/// `{"deleted": <key>}` after a successful delete.
pub fn deleted<T: Serialize>(key: T) -> Reply<T> {
    ok("deleted", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_serializes_as_single_key_object() {
        let v = serde_json::to_value(Named { key: "jobs", value: vec![1, 2] }).unwrap();
        assert_eq!(v, serde_json::json!({"jobs": [1, 2]}));
    }

    #[test]
    fn deleted_reply() {
        let (status, Json(body)) = deleted(7);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({"deleted": 7}));
    }
}
