//! Event triggers on tracked tables.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::{QualifiedTable, TriggerName};
use crate::payload::Payload;

/// An event trigger attached to a tracked table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventTrigger {
    /// Table whose changes fire the trigger.
    pub table: QualifiedTable,
    /// Trigger name.
    pub name: TriggerName,
    /// Operations, webhook and retry settings.
    pub definition: Payload,
}

const TABLE: FieldSpec = FieldSpec::required("table", "table");
const NAME: FieldSpec = FieldSpec::required("name", "name");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "def");

impl Record for EventTrigger {
    const SPEC: RecordSpec = RecordSpec {
        entity: "event trigger",
        fields: &[TABLE, NAME, DEFINITION],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let table = reader.required(&TABLE)?;
        let name: TriggerName = reader.required(&NAME)?;
        reader.identify(&name);

        Ok(Self {
            table,
            name,
            definition: reader.required(&DEFINITION)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&TABLE, &self.table);
        writer.put(&NAME, &self.name);
        writer.put(&DEFINITION, &self.definition);
    }
}

json_record!(EventTrigger);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{FromJson, ToJson};
    use serde_json::json;

    #[test]
    fn test_event_trigger_round_trip() {
        let raw = json!({
            "table": {"schema": "public", "name": "orders"},
            "name": "notify_shipping",
            "def": {"insert": {"columns": "*"}, "webhook": "https://example.com/hook"}
        });
        let trigger = EventTrigger::from_json(&raw).unwrap();

        assert_eq!(trigger.name.as_str(), "notify_shipping");
        assert_eq!(trigger.to_json(), raw);
    }

    #[test]
    fn test_empty_trigger_name() {
        let err = EventTrigger::from_json(&json!({
            "table": "orders",
            "name": "",
            "def": {}
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid value at name: trigger name must not be empty"
        );
    }
}
