//! Opaque definition payloads.

use crate::decode::{FromJson, JsonPath, ToJson};
use crate::error::DecodeResult;
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// An unvalidated structured value carried through decoding untouched.
///
/// Relation, permission, trigger, and action definitions vary by entity
/// kind and are interpreted by the schema builder, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Value);

impl Payload {
    /// Wrap a JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Object members are hashed in key order so the hash agrees with `Value`
/// equality regardless of map ordering.
impl Hash for Payload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(members) => {
            5u8.hash(state);
            members.len().hash(state);
            let mut keys: Vec<&String> = members.keys().collect();
            keys.sort();
            for key in keys {
                key.hash(state);
                hash_value(&members[key], state);
            }
        }
    }
}

impl FromJson for Payload {
    fn from_json_at(value: &Value, _path: &JsonPath) -> DecodeResult<Self> {
        Ok(Self(value.clone()))
    }
}

impl ToJson for Payload {
    fn to_json(&self) -> Value {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(payload: &Payload) -> u64 {
        let mut hasher = DefaultHasher::new();
        payload.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_payload_preserved() {
        let raw = json!({"manual_configuration": {"remote_table": "users"}, "n": [1, 2.5, null]});
        let payload = Payload::from_json(&raw).unwrap();
        assert_eq!(payload.as_value(), &raw);
        assert_eq!(payload.to_json(), raw);
        assert_eq!(payload.into_value(), raw);
    }

    #[test]
    fn test_payload_hash_matches_equality() {
        let a = Payload::new(json!({"filter": {"id": {"_eq": "X-Hasura-User-Id"}}, "columns": ["id"]}));
        let b = Payload::new(json!({"columns": ["id"], "filter": {"id": {"_eq": "X-Hasura-User-Id"}}}));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = Payload::new(json!({"columns": ["name"]}));
        assert_ne!(a, c);
    }

    #[test]
    fn test_signed_zero_hashes_equal() {
        let negative = Payload::new(json!({"limit": -0.0}));
        let positive = Payload::new(json!({"limit": 0.0}));

        assert_eq!(negative, positive);
        assert_eq!(hash_of(&negative), hash_of(&positive));
    }

    #[test]
    fn test_null_payload_is_kept() {
        let payload = Payload::from_json(&json!(null)).unwrap();
        assert_eq!(payload.as_value(), &Value::Null);
    }
}
