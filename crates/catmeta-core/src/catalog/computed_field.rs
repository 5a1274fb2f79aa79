//! Computed fields backed by SQL functions.

use super::RawFunction;
use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::{ComputedFieldName, QualifiedTable};
use crate::payload::Payload;

/// A computed field as stored in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComputedFieldDef {
    /// Table the field is added to.
    pub table: QualifiedTable,
    /// Field name.
    pub name: ComputedFieldName,
    /// Backing function and argument bindings.
    pub definition: Payload,
    pub comment: Option<String>,
}

const DEF_TABLE: FieldSpec = FieldSpec::required("table", "table");
const DEF_NAME: FieldSpec = FieldSpec::required("name", "name");
const DEF_DEFINITION: FieldSpec = FieldSpec::required("definition", "definition");
const DEF_COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");

impl Record for ComputedFieldDef {
    const SPEC: RecordSpec = RecordSpec {
        entity: "computed field definition",
        fields: &[DEF_TABLE, DEF_NAME, DEF_DEFINITION, DEF_COMMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            table: reader.required(&DEF_TABLE)?,
            name: reader.required(&DEF_NAME)?,
            definition: reader.required(&DEF_DEFINITION)?,
            comment: reader.optional(&DEF_COMMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&DEF_TABLE, &self.table);
        writer.put(&DEF_NAME, &self.name);
        writer.put(&DEF_DEFINITION, &self.definition);
        writer.put_optional(&DEF_COMMENT, &self.comment);
    }
}

/// A computed field together with every overload of its backing function.
///
/// Which overload applies is resolved by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComputedField {
    pub definition: ComputedFieldDef,
    pub functions: Vec<RawFunction>,
}

const DEFINITION: FieldSpec = FieldSpec::required("definition", "computed_field");
const FUNCTIONS: FieldSpec = FieldSpec::required("functions", "function_info");

impl Record for ComputedField {
    const SPEC: RecordSpec = RecordSpec {
        entity: "computed field",
        fields: &[DEFINITION, FUNCTIONS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let definition: ComputedFieldDef = reader.required(&DEFINITION)?;
        reader.identify(format_args!("{}.{}", definition.table, definition.name));

        Ok(Self {
            definition,
            functions: reader.required(&FUNCTIONS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&DEFINITION, &self.definition);
        writer.put(&FUNCTIONS, &self.functions);
    }
}

json_record!(ComputedFieldDef, ComputedField);
