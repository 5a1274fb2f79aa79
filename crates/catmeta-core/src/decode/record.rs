//! Field-table driven record reading and writing.

use super::{FieldSpec, FromJson, JsonPath, RecordSpec, ToJson};
use crate::error::{DecodeError, DecodeResult};
use serde_json::{Map, Value};
use std::fmt;

/// An entity decoded from, and encoded to, a JSON object through its
/// declared field table.
pub trait Record: Sized {
    /// The entity's field table.
    const SPEC: RecordSpec;

    /// Build the record from a reader positioned on its object.
    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self>;

    /// Write the record's attributes.
    fn write(&self, writer: &mut RecordWriter);
}

/// Decode a record from the object at `path`.
pub fn read_record<R: Record>(value: &Value, path: &JsonPath) -> DecodeResult<R> {
    let map = value.as_object().ok_or_else(|| {
        DecodeError::expected(path, &format!("{} object", R::SPEC.entity), value)
    })?;
    let mut reader = RecordReader::new(R::SPEC, map, path.clone());
    R::read(&mut reader)
}

/// Encode a record as a JSON object.
pub fn write_record<R: Record>(record: &R) -> Value {
    let mut writer = RecordWriter::new(R::SPEC);
    record.write(&mut writer);
    writer.finish()
}

/// Reads declared fields out of one JSON object.
///
/// Members not named in the field table are ignored.
pub struct RecordReader<'a> {
    spec: RecordSpec,
    map: &'a Map<String, Value>,
    path: JsonPath,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over `map`, located at `path`.
    pub fn new(spec: RecordSpec, map: &'a Map<String, Value>, path: JsonPath) -> Self {
        Self { spec, map, path }
    }

    /// Current path, including any identity label.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Label subsequent diagnostics with the record's identity.
    pub fn identify(&mut self, id: impl fmt::Display) {
        self.path = self.path.labelled(self.spec.entity, id.to_string());
    }

    /// Decode a required field.
    pub fn required<T: FromJson>(&self, field: &FieldSpec) -> DecodeResult<T> {
        self.debug_check(field);
        debug_assert!(field.is_required(), "`{}` is optional", field.external);
        match self.map.get(field.external) {
            Some(value) => T::from_json_at(value, &self.path.field(field.external)),
            None => Err(DecodeError::MissingField {
                path: self.path.clone(),
                entity: self.spec.entity,
                field: field.external,
            }),
        }
    }

    /// Decode an optional field. Absence and `null` both yield `None`.
    pub fn optional<T: FromJson>(&self, field: &FieldSpec) -> DecodeResult<Option<T>> {
        self.debug_check(field);
        debug_assert!(!field.is_required(), "`{}` is required", field.external);
        match self.map.get(field.external) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_json_at(value, &self.path.field(field.external)).map(Some),
        }
    }

    /// Build an invariant violation located at this record.
    pub fn invariant(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::invariant(&self.path, message)
    }

    fn debug_check(&self, field: &FieldSpec) {
        debug_assert!(
            self.spec.external(field.external) == Some(field),
            "`{}` ({}) is not a {} field",
            field.external,
            field.attribute,
            self.spec.entity
        );
    }
}

/// Writes declared fields into a JSON object.
pub struct RecordWriter {
    spec: RecordSpec,
    map: Map<String, Value>,
}

impl RecordWriter {
    /// Create a writer for the given field table.
    pub fn new(spec: RecordSpec) -> Self {
        Self {
            spec,
            map: Map::new(),
        }
    }

    /// Write a field.
    pub fn put<T: ToJson + ?Sized>(&mut self, field: &FieldSpec, value: &T) {
        debug_assert!(
            self.spec.external(field.external) == Some(field),
            "`{}` ({}) is not a {} field",
            field.external,
            field.attribute,
            self.spec.entity
        );
        self.map.insert(field.external.to_string(), value.to_json());
    }

    /// Write an optional field, omitting it when absent.
    pub fn put_optional<T: ToJson>(&mut self, field: &FieldSpec, value: &Option<T>) {
        if let Some(value) = value {
            self.put(field, value);
        }
    }

    /// Finish the object.
    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

/// Implement [`FromJson`] and [`ToJson`] for [`Record`] types.
macro_rules! json_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::decode::FromJson for $ty {
                fn from_json_at(
                    value: &::serde_json::Value,
                    path: &$crate::decode::JsonPath,
                ) -> $crate::error::DecodeResult<Self> {
                    $crate::decode::read_record(value, path)
                }
            }

            impl $crate::decode::ToJson for $ty {
                fn to_json(&self) -> ::serde_json::Value {
                    $crate::decode::write_record(self)
                }
            }
        )*
    };
}

pub(crate) use json_record;
