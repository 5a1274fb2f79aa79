//! Remote schema registrations.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::RemoteSchemaName;
use crate::payload::Payload;

/// A remote GraphQL schema merged into the served schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteSchema {
    pub name: RemoteSchemaName,
    /// Endpoint, headers and forwarding options.
    pub definition: Payload,
    pub comment: Option<String>,
}

const NAME: FieldSpec = FieldSpec::required("name", "name");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "definition");
const COMMENT: FieldSpec = FieldSpec::optional("comment", "comment");

impl Record for RemoteSchema {
    const SPEC: RecordSpec = RecordSpec {
        entity: "remote schema",
        fields: &[NAME, DEFINITION, COMMENT],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: RemoteSchemaName = reader.required(&NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            definition: reader.required(&DEFINITION)?,
            comment: reader.optional(&COMMENT)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&NAME, &self.name);
        writer.put(&DEFINITION, &self.definition);
        writer.put_optional(&COMMENT, &self.comment);
    }
}

json_record!(RemoteSchema);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::FromJson;
    use serde_json::json;

    #[test]
    fn test_decode_remote_schema() {
        let schema = RemoteSchema::from_json(&json!({
            "name": "payments",
            "definition": {"url": "https://payments.internal/graphql", "forward_client_headers": true}
        }))
        .unwrap();

        assert_eq!(schema.name.as_str(), "payments");
        assert_eq!(schema.definition.as_value()["forward_client_headers"], json!(true));
    }

    #[test]
    fn test_missing_definition() {
        let err = RemoteSchema::from_json(&json!({"name": "payments"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field `definition` of remote schema at $ (remote schema payments)"
        );
    }
}
