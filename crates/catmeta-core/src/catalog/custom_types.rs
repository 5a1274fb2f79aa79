//! Custom GraphQL type definitions.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::TypeName;
use crate::payload::Payload;
use std::collections::BTreeSet;

/// User-declared GraphQL types, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CustomTypeDefinitions {
    pub input_objects: Option<Vec<Payload>>,
    pub objects: Option<Vec<Payload>>,
    pub scalars: Option<Vec<Payload>>,
    pub enums: Option<Vec<Payload>>,
}

impl CustomTypeDefinitions {
    /// Total number of declared types.
    pub fn len(&self) -> usize {
        [
            self.input_objects.as_ref(),
            self.objects.as_ref(),
            self.scalars.as_ref(),
            self.enums.as_ref(),
        ]
        .into_iter()
        .map(|group| group.map_or(0, Vec::len))
        .sum()
    }

    /// Check if no types are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const INPUT_OBJECTS: FieldSpec = FieldSpec::optional("input_objects", "input_objects");
const OBJECTS: FieldSpec = FieldSpec::optional("objects", "objects");
const SCALARS: FieldSpec = FieldSpec::optional("scalars", "scalars");
const ENUMS: FieldSpec = FieldSpec::optional("enums", "enums");

impl Record for CustomTypeDefinitions {
    const SPEC: RecordSpec = RecordSpec {
        entity: "custom type definitions",
        fields: &[INPUT_OBJECTS, OBJECTS, SCALARS, ENUMS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            input_objects: reader.optional(&INPUT_OBJECTS)?,
            objects: reader.optional(&OBJECTS)?,
            scalars: reader.optional(&SCALARS)?,
            enums: reader.optional(&ENUMS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put_optional(&INPUT_OBJECTS, &self.input_objects);
        writer.put_optional(&OBJECTS, &self.objects);
        writer.put_optional(&SCALARS, &self.scalars);
        writer.put_optional(&ENUMS, &self.enums);
    }
}

/// Custom type definitions plus the built-in scalar types they may refer to.
///
/// The scalar set is not part of stored metadata. It is gathered from the
/// database alongside the snapshot so type generation can validate scalar
/// references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CustomTypes {
    pub definitions: CustomTypeDefinitions,
    pub builtin_scalars: BTreeSet<TypeName>,
}

const DEFINITIONS: FieldSpec = FieldSpec::required("definitions", "custom_types");
const BUILTIN_SCALARS: FieldSpec = FieldSpec::required("builtin_scalars", "pg_scalars");

impl Record for CustomTypes {
    const SPEC: RecordSpec = RecordSpec {
        entity: "custom types",
        fields: &[DEFINITIONS, BUILTIN_SCALARS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            definitions: reader.required(&DEFINITIONS)?,
            builtin_scalars: reader.required(&BUILTIN_SCALARS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&DEFINITIONS, &self.definitions);
        writer.put(&BUILTIN_SCALARS, &self.builtin_scalars);
    }
}

json_record!(CustomTypeDefinitions, CustomTypes);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{FromJson, ToJson};
    use serde_json::json;

    #[test]
    fn test_absent_groups_stay_absent() {
        let types = CustomTypes::from_json(&json!({
            "custom_types": {"objects": [{"name": "ShipmentStatus", "fields": []}]},
            "pg_scalars": ["int4", "text", "int4"]
        }))
        .unwrap();

        assert!(types.definitions.input_objects.is_none());
        assert_eq!(types.definitions.objects.as_ref().map(Vec::len), Some(1));
        assert_eq!(types.definitions.len(), 1);
        assert_eq!(types.builtin_scalars.len(), 2);
    }

    #[test]
    fn test_empty_group_differs_from_absent() {
        let empty = CustomTypeDefinitions::from_json(&json!({"enums": []})).unwrap();
        let absent = CustomTypeDefinitions::from_json(&json!({})).unwrap();

        assert!(empty.is_empty());
        assert!(absent.is_empty());
        assert_ne!(empty, absent);
    }

    #[test]
    fn test_custom_types_round_trip() {
        let raw = json!({
            "custom_types": {
                "scalars": [{"name": "Geo"}],
                "enums": [{"name": "Color", "values": [{"value": "RED"}]}]
            },
            "pg_scalars": ["int4", "text"]
        });
        assert_eq!(CustomTypes::from_json(&raw).unwrap().to_json(), raw);
    }
}
