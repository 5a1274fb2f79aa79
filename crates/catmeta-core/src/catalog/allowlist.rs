//! Query collections on the allow-list.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::CollectionName;
use crate::payload::Payload;

/// A named collection of queries permitted when the allow-list is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowlistCollection {
    pub name: CollectionName,
    /// The collection's queries.
    pub definition: Payload,
}

const NAME: FieldSpec = FieldSpec::required("name", "name");
const DEFINITION: FieldSpec = FieldSpec::required("definition", "definition");

impl Record for AllowlistCollection {
    const SPEC: RecordSpec = RecordSpec {
        entity: "allowlist collection",
        fields: &[NAME, DEFINITION],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: CollectionName = reader.required(&NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            definition: reader.required(&DEFINITION)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&NAME, &self.name);
        writer.put(&DEFINITION, &self.definition);
    }
}

json_record!(AllowlistCollection);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{FromJson, ToJson};
    use serde_json::json;

    #[test]
    fn test_allowlist_round_trip() {
        let raw = json!({
            "name": "storefront",
            "definition": {"queries": [{"name": "recent_orders", "query": "query { orders { id } }"}]}
        });
        let collection = AllowlistCollection::from_json(&raw).unwrap();

        assert_eq!(collection.name.as_str(), "storefront");
        assert_eq!(collection.to_json(), raw);
    }
}
