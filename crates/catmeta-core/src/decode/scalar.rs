//! Leaf decoders for JSON scalars and collections.

use super::{FromJson, JsonPath, ToJson};
use crate::error::{DecodeError, DecodeResult};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

impl FromJson for bool {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::expected(path, "a boolean", value))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for String {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DecodeError::expected(path, "a string", value))
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for u32 {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        let n = value
            .as_u64()
            .ok_or_else(|| DecodeError::expected(path, "a non-negative integer", value))?;
        u32::try_from(n).map_err(|_| DecodeError::shape(path, format!("{} is out of range", n)))
    }
}

impl ToJson for u32 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FromJson for i32 {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        let n = value
            .as_i64()
            .ok_or_else(|| DecodeError::expected(path, "an integer", value))?;
        i32::try_from(n).map_err(|_| DecodeError::shape(path, format!("{} is out of range", n)))
    }
}

impl ToJson for i32 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::expected(path, "an array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_json_at(item, &path.index(i)))
            .collect()
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

/// Sets are encoded as arrays; repeated elements collapse.
impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        Vec::<T>::from_json_at(value, path).map(|items| items.into_iter().collect())
    }
}

impl<T: ToJson> ToJson for BTreeSet<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

/// Maps are encoded as objects whose member names decode as keys.
impl<K: FromJson + Ord, V: FromJson> FromJson for BTreeMap<K, V> {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        let members = value
            .as_object()
            .ok_or_else(|| DecodeError::expected(path, "an object", value))?;
        members
            .iter()
            .map(|(name, member)| {
                let member_path = path.field(name);
                let key = K::from_json_at(&Value::String(name.clone()), &member_path)?;
                let value = V::from_json_at(member, &member_path)?;
                Ok((key, value))
            })
            .collect()
    }
}

impl<K: fmt::Display, V: ToJson> ToJson for BTreeMap<K, V> {
    fn to_json(&self) -> Value {
        let members: Map<String, Value> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect();
        Value::Object(members)
    }
}

/// A closed set of string keywords, such as a relation type.
pub trait Keyword: Copy + PartialEq + 'static {
    /// What the keyword denotes, for diagnostics.
    const KIND: &'static str;

    /// Every accepted spelling and the variant it selects.
    const KEYWORDS: &'static [(&'static str, Self)];

    /// The canonical spelling of this variant.
    fn as_str(&self) -> &'static str {
        Self::KEYWORDS
            .iter()
            .find(|(_, variant)| variant == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

/// Decode a keyword string.
pub fn read_keyword<K: Keyword>(value: &Value, path: &JsonPath) -> DecodeResult<K> {
    let raw = String::from_json_at(value, path)?;
    K::KEYWORDS
        .iter()
        .find(|(name, _)| *name == raw)
        .map(|(_, variant)| *variant)
        .ok_or_else(|| {
            let accepted: Vec<String> = K::KEYWORDS
                .iter()
                .map(|(name, _)| format!("`{}`", name))
                .collect();
            DecodeError::shape(
                path,
                format!(
                    "unknown {} `{}`, expected one of {}",
                    K::KIND,
                    raw,
                    accepted.join(", ")
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    impl Keyword for Shade {
        const KIND: &'static str = "shade";
        const KEYWORDS: &'static [(&'static str, Self)] =
            &[("light", Shade::Light), ("dark", Shade::Dark)];
    }

    #[test]
    fn test_scalars() {
        assert!(bool::from_json(&json!(true)).unwrap());
        assert_eq!(String::from_json(&json!("x")).unwrap(), "x");
        assert_eq!(u32::from_json(&json!(16384)).unwrap(), 16384);
        assert_eq!(i32::from_json(&json!(-3)).unwrap(), -3);
    }

    #[test]
    fn test_integer_range() {
        let err = u32::from_json(&json!(-1)).unwrap_err();
        assert!(err.to_string().contains("expected a non-negative integer"));

        let err = u32::from_json(&json!(u64::MAX)).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = i32::from_json(&json!(1.5)).unwrap_err();
        assert!(err.to_string().contains("expected an integer"));
    }

    #[test]
    fn test_vec_element_path() {
        let err = Vec::<String>::from_json(&json!(["a", 1])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value at $[1]: expected a string, found a number"
        );
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let set = BTreeSet::<String>::from_json(&json!(["b", "a", "b"])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_json(), json!(["a", "b"]));
    }

    #[test]
    fn test_map_members() {
        let map = BTreeMap::<String, u32>::from_json(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.to_json(), json!({"a": 1, "b": 2}));

        let err = BTreeMap::<String, u32>::from_json(&json!({"a": "one"})).unwrap_err();
        assert!(err.to_string().starts_with("invalid value at a:"));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(read_keyword::<Shade>(&json!("dark"), &JsonPath::root()).unwrap(), Shade::Dark);
        assert_eq!(Shade::Light.as_str(), "light");

        let err = read_keyword::<Shade>(&json!("grey"), &JsonPath::root()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value at $: unknown shade `grey`, expected one of `light`, `dark`"
        );
    }
}
