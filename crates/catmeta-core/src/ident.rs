//! Identifiers used throughout the catalog.

use crate::decode::{
    read_record, write_record, FieldSpec, FromJson, JsonPath, Record, RecordReader, RecordSpec,
    RecordWriter, ToJson,
};
use crate::error::{DecodeError, DecodeResult};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentError {
    /// Identifiers must be non-empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(IdentError::Empty($what));
                }
                Ok(Self(value))
            }

            /// The name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromJson for $name {
            fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
                let raw = String::from_json_at(value, path)?;
                Self::new(raw).map_err(|e| DecodeError::shape(path, e.to_string()))
            }
        }

        impl ToJson for $name {
            fn to_json(&self) -> Value {
                Value::String(self.0.clone())
            }
        }
    };
}

name_type!(
    /// Database schema name.
    SchemaName,
    "schema name"
);
name_type!(
    /// Unqualified table name.
    TableName,
    "table name"
);
name_type!(
    /// Unqualified function name.
    FunctionName,
    "function name"
);
name_type!(
    /// Unqualified type name.
    TypeName,
    "type name"
);
name_type!(
    /// Column name.
    ColumnName,
    "column name"
);
name_type!(
    /// Constraint name.
    ConstraintName,
    "constraint name"
);
name_type!(
    /// Access-control role.
    RoleName,
    "role name"
);
name_type!(
    /// Relationship name, unique per table.
    RelationName,
    "relation name"
);
name_type!(
    /// Event trigger name.
    TriggerName,
    "trigger name"
);
name_type!(
    /// Computed field name, unique per table.
    ComputedFieldName,
    "computed field name"
);
name_type!(RemoteSchemaName, "remote schema name");
name_type!(CollectionName, "collection name");
name_type!(ActionName, "action name");

impl SchemaName {
    /// The default schema.
    pub fn public() -> Self {
        Self(String::from("public"))
    }
}

/// Postgres object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(pub u32);

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromJson for Oid {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        u32::from_json_at(value, path).map(Oid)
    }
}

impl ToJson for Oid {
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
}

/// A schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName<T> {
    /// Owning schema.
    pub schema: SchemaName,
    /// Object name within the schema.
    pub name: T,
}

/// A schema-qualified table name.
pub type QualifiedTable = QualifiedName<TableName>;

/// A schema-qualified function name.
pub type QualifiedFunction = QualifiedName<FunctionName>;

/// A schema-qualified type name.
pub type QualifiedType = QualifiedName<TypeName>;

impl<T> QualifiedName<T> {
    /// Create a qualified name.
    pub fn new(schema: SchemaName, name: T) -> Self {
        Self { schema, name }
    }

    /// Create a name in the `public` schema.
    pub fn public(name: T) -> Self {
        Self::new(SchemaName::public(), name)
    }
}

impl<T: fmt::Display> fmt::Display for QualifiedName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

const SCHEMA: FieldSpec = FieldSpec::optional("schema", "schema");
const NAME: FieldSpec = FieldSpec::required("name", "name");

impl<T: FromJson + ToJson> Record for QualifiedName<T> {
    const SPEC: RecordSpec = RecordSpec {
        entity: "qualified name",
        fields: &[SCHEMA, NAME],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            schema: reader
                .optional(&SCHEMA)?
                .unwrap_or_else(SchemaName::public),
            name: reader.required(&NAME)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&SCHEMA, &self.schema);
        writer.put(&NAME, &self.name);
    }
}

/// Accepts `{"schema": s, "name": n}`, `[s, n]`, or a bare `n` in the
/// `public` schema.
impl<T: FromJson + ToJson> FromJson for QualifiedName<T> {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        match value {
            Value::String(_) => Ok(Self::public(T::from_json_at(value, path)?)),
            Value::Array(parts) => match parts.as_slice() {
                [schema, name] => Ok(Self {
                    schema: SchemaName::from_json_at(schema, &path.index(0))?,
                    name: T::from_json_at(name, &path.index(1))?,
                }),
                _ => Err(DecodeError::shape(
                    path,
                    format!(
                        "expected a [schema, name] pair, found {} elements",
                        parts.len()
                    ),
                )),
            },
            Value::Object(_) => read_record(value, path),
            _ => Err(DecodeError::expected(path, "a qualified name", value)),
        }
    }
}

impl<T: FromJson + ToJson> ToJson for QualifiedName<T> {
    fn to_json(&self) -> Value {
        write_record(self)
    }
}
