//! Relationships between tracked tables.

use crate::decode::{
    json_record, read_keyword, FieldSpec, FromJson, JsonPath, Keyword, Record, RecordReader,
    RecordSpec, RecordWriter, ToJson,
};
use crate::error::DecodeResult;
use crate::ident::{QualifiedTable, RelationName};
use crate::payload::Payload;
use serde_json::Value;

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// At most one related row.
    Object,
    /// Any number of related rows.
    Array,
}

impl Keyword for RelationKind {
    const KIND: &'static str = "relation type";
    const KEYWORDS: &'static [(&'static str, Self)] =
        &[("object", RelationKind::Object), ("array", RelationKind::Array)];
}

impl FromJson for RelationKind {
    fn from_json_at(value: &Value, path: &JsonPath) -> DecodeResult<Self> {
        read_keyword(value, path)
    }
}

impl ToJson for RelationKind {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

/// A relationship defined on a tracked table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    /// Owning table.
    pub table: QualifiedTable,
    /// Relation name.
    pub name: RelationName,
    /// Relation cardinality.
    pub kind: RelationKind,
    /// Relationship definition, interpreted by the schema builder.
    pub definition: Payload,
    pub comment: Option<String>,
}

const TABLE: FieldSpec = FieldSpec::required("table", "table");
const NAME: FieldSpec = FieldSpec::required("name", "rel_name");
const KIND: FieldSpec = FieldSpec::required("kind", "rel_type");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "def");
const COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");

impl Record for Relation {
    const SPEC: RecordSpec = RecordSpec {
        entity: "relation",
        fields: &[TABLE, NAME, KIND, DEFINITION, COMMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let table: QualifiedTable = reader.required(&TABLE)?;
        let name: RelationName = reader.required(&NAME)?;
        reader.identify(format_args!("{}.{}", table, name));

        Ok(Self {
            table,
            name,
            kind: reader.required(&KIND)?,
            definition: reader.required(&DEFINITION)?,
            comment: reader.optional(&COMMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&TABLE, &self.table);
        writer.put(&NAME, &self.name);
        writer.put(&KIND, &self.kind);
        writer.put(&DEFINITION, &self.definition);
        writer.put_optional(&COMMENT, &self.comment);
    }
}

json_record!(Relation);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_relation() {
        let def = json!({"foreign_key_constraint_on": "customer_id"});
        let rel = Relation::from_json(&json!({
            "table": {"schema": "public", "name": "orders"},
            "rel_name": "customer",
            "rel_type": "object",
            "def": def,
            "comment": null
        }))
        .unwrap();

        assert_eq!(rel.name.as_str(), "customer");
        assert_eq!(rel.kind, RelationKind::Object);
        assert_eq!(rel.definition.as_value(), &def);
        assert!(rel.comment.is_none());
    }

    #[test]
    fn test_unknown_relation_type() {
        let err = Relation::from_json(&json!({
            "table": "customers",
            "rel_name": "orders",
            "rel_type": "many",
            "def": {}
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid value at $ (relation public.customers.orders).rel_type: \
             unknown relation type `many`, expected one of `object`, `array`"
        );
    }

    #[test]
    fn test_relation_round_trip() {
        let raw = json!({
            "table": {"schema": "public", "name": "customers"},
            "rel_name": "orders",
            "rel_type": "array",
            "def": {"foreign_key_constraint_on": {"table": "orders", "column": "customer_id"}},
            "comment": "all orders placed"
        });
        let rel = Relation::from_json(&raw).unwrap();
        assert_eq!(rel.to_json(), raw);
    }
}
