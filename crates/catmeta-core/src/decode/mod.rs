//! Decoding machinery shared by every catalog entity.
//!
//! Entities declare a static field table ([`RecordSpec`]) naming each
//! external member, the attribute it populates, and whether it is required.
//! [`RecordReader`] and [`RecordWriter`] drive decoding and re-encoding from
//! that table, so an entity's wire shape lives in one place.

mod field;
mod path;
mod record;
mod scalar;

pub use field::{FieldSpec, Presence, RecordSpec};
pub use path::JsonPath;
pub use record::{read_record, write_record, Record, RecordReader, RecordWriter};
pub use scalar::{read_keyword, Keyword};

pub(crate) use record::json_record;

use crate::error::DecodeResult;
use serde_json::Value;

/// Types that can be decoded from a JSON value.
pub trait FromJson: Sized {
    /// Decode a value located at `path` in the document.
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self>;

    /// Decode a value at the document root.
    fn from_json(value: &Value) -> DecodeResult<Self> {
        Self::from_json_at(value, &JsonPath::root())
    }
}

/// Types that can be encoded to a JSON value using their declared field
/// mapping.
pub trait ToJson {
    /// Encode the value.
    fn to_json(&self) -> Value;
}
