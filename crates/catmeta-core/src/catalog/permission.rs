//! Role-based access rules.

use crate::decode::{
    json_record, read_keyword, FieldSpec, FromJson, JsonPath, Keyword, Record, RecordReader,
    RecordSpec, RecordWriter, ToJson,
};
use crate::error::DecodeResult;
use crate::ident::{QualifiedTable, RoleName};
use crate::payload::Payload;
use serde_json::Value;

/// Operation a permission governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl Keyword for PermissionKind {
    const KIND: &'static str = "permission type";
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("select", PermissionKind::Select),
        ("insert", PermissionKind::Insert),
        ("update", PermissionKind::Update),
        ("delete", PermissionKind::Delete),
    ];
}

impl FromJson for PermissionKind {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        read_keyword(value, path)
    }
}

impl ToJson for PermissionKind {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

/// A permission granted to a role on a tracked table.
///
/// `(table, role, kind)` identifies a permission in practice, but the
/// snapshot may contain duplicates; resolving them is the schema builder's
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission {
    pub table: QualifiedTable,
    pub role: RoleName,
    pub kind: PermissionKind,
    /// Permission definition (filters, columns, presets).
    pub definition: Payload,
    pub comment: Option<String>,
}

const TABLE: FieldSpec = FieldSpec::required("table", "table");
const ROLE: FieldSpec = FieldSpec::required("role", "role");
const KIND: FieldSpec = FieldSpec::required("kind", "perm_type");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "def");
const COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");

impl Record for Permission {
    const SPEC: RecordSpec = RecordSpec {
        entity: "permission",
        fields: &[TABLE, ROLE, KIND, DEFINITION, COMMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let table: QualifiedTable = reader.required(&TABLE)?;
        let role: RoleName = reader.required(&ROLE)?;
        reader.identify(format_args!("{} on {}", role, table));

        Ok(Self {
            table,
            role,
            kind: reader.required(&KIND)?,
            definition: reader.required(&DEFINITION)?,
            comment: reader.optional(&COMMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&TABLE, &self.table);
        writer.put(&ROLE, &self.role);
        writer.put(&KIND, &self.kind);
        writer.put(&DEFINITION, &self.definition);
        writer.put_optional(&COMMENT, &self.comment);
    }
}

json_record!(Permission);
