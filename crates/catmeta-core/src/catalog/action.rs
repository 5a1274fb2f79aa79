//! Custom actions.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::{ActionName, RoleName};
use crate::payload::Payload;

/// A role allowed to invoke an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionPermission {
    pub role: RoleName,
    pub comment: Option<String>,
}

const PERMISSION_ROLE: FieldSpec = FieldSpec::required("role", "role");
const PERMISSION_COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");

impl Record for ActionPermission {
    const SPEC: RecordSpec = RecordSpec {
        entity: "action permission",
        fields: &[PERMISSION_ROLE, PERMISSION_COMMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            role: reader.required(&PERMISSION_ROLE)?,
            comment: reader.optional(&PERMISSION_COMMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&PERMISSION_ROLE, &self.role);
        writer.put_optional(&PERMISSION_COMMENT, &self.comment);
    }
}

/// A custom mutation or query resolved by a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub name: ActionName,
    /// Arguments, output type and handler.
    pub definition: Payload,
    pub comment: Option<String>,
    /// Roles allowed to invoke the action, in metadata order.
    pub permissions: Vec<ActionPermission>,
}

const NAME: FieldSpec = FieldSpec::required("name", "name");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "definition");
const COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");
const PERMISSIONS: FieldSpec = FieldSpec::required("permissions", "permissions");

impl Record for Action {
    const SPEC: RecordSpec = RecordSpec {
        entity: "action",
        fields: &[NAME, DEFINITION, COMMENT, PERMISSIONS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: ActionName = reader.required(&NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            definition: reader.required(&DEFINITION)?,
            comment: reader.optional(&COMMENT)?,
            permissions: reader.required(&PERMISSIONS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&NAME, &self.name);
        writer.put(&DEFINITION, &self.definition);
        writer.put_optional(&COMMENT, &self.comment);
        writer.put(&PERMISSIONS, &self.permissions);
    }
}

json_record!(ActionPermission, Action);
