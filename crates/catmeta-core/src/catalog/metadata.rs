//! The catalog metadata snapshot.

use super::{
    Action, AllowlistCollection, ComputedField, CustomTypes, EventTrigger, Function, Permission,
    Relation, RemoteSchema, Table,
};
use crate::decode::{
    json_record, FieldSpec, FromJson, Record, RecordReader, RecordSpec, RecordWriter,
};
use crate::error::DecodeResult;
use crate::ident::{QualifiedTable, RoleName};
use tracing::debug;

/// Point-in-time snapshot of every catalog entity.
///
/// Built once per decode and never mutated; the next snapshot replaces it
/// wholesale. Element order within each list follows the source document.
/// No cross-entity checks are made here, so a relation may name a table that
/// is not in `tables`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogMetadata {
    pub tables: Vec<Table>,
    pub relations: Vec<Relation>,
    pub permissions: Vec<Permission>,
    pub event_triggers: Vec<EventTrigger>,
    pub remote_schemas: Vec<RemoteSchema>,
    pub functions: Vec<Function>,
    pub allowlist: Vec<AllowlistCollection>,
    pub computed_fields: Vec<ComputedField>,
    pub custom_types: CustomTypes,
    pub actions: Vec<Action>,
}

/// Entity counts of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub tables: usize,
    /// Tracked tables that introspection did not find.
    pub tables_without_info: usize,
    pub relations: usize,
    pub permissions: usize,
    pub event_triggers: usize,
    pub remote_schemas: usize,
    pub functions: usize,
    /// Overloads across all tracked functions.
    pub function_overloads: usize,
    pub allowlist: usize,
    pub computed_fields: usize,
    pub custom_types: usize,
    pub actions: usize,
}

impl CatalogMetadata {
    /// Look up a tracked table by name.
    pub fn table(&self, name: &QualifiedTable) -> Option<&Table> {
        self.tables.iter().find(|t| &t.name == name)
    }

    /// Relations owned by a table.
    pub fn relations_of<'a>(
        &'a self,
        table: &'a QualifiedTable,
    ) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| &r.table == table)
    }

    /// Permissions granted to a role, across all tables.
    pub fn permissions_for<'a>(
        &'a self,
        role: &'a RoleName,
    ) -> impl Iterator<Item = &'a Permission> + 'a {
        self.permissions.iter().filter(move |p| &p.role == role)
    }

    /// Count the entities in the snapshot.
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            tables: self.tables.len(),
            tables_without_info: self.tables.iter().filter(|t| t.info.is_none()).count(),
            relations: self.relations.len(),
            permissions: self.permissions.len(),
            event_triggers: self.event_triggers.len(),
            remote_schemas: self.remote_schemas.len(),
            functions: self.functions.len(),
            function_overloads: self.functions.iter().map(|f| f.overloads.len()).sum(),
            allowlist: self.allowlist.len(),
            computed_fields: self.computed_fields.len(),
            custom_types: self.custom_types.definitions.len(),
            actions: self.actions.len(),
        }
    }
}

const TABLES: FieldSpec = FieldSpec::optional("tables", "tables");
const RELATIONS: FieldSpec = FieldSpec::optional("relations", "relations");
const PERMISSIONS: FieldSpec = FieldSpec::optional("permissions", "permissions");
const EVENT_TRIGGERS: FieldSpec = FieldSpec::optional("event_triggers", "event_triggers");
const REMOTE_SCHEMAS: FieldSpec = FieldSpec::optional("remote_schemas", "remote_schemas");
const FUNCTIONS: FieldSpec = FieldSpec::optional("functions", "functions");
const ALLOWLIST: FieldSpec = FieldSpec::optional("allowlist", "allowlist");
const COMPUTED_FIELDS: FieldSpec = FieldSpec::optional("computed_fields", "computed_fields");
const CUSTOM_TYPES: FieldSpec = FieldSpec::required("custom_types", "custom_types");
const ACTIONS: FieldSpec = FieldSpec::optional("actions", "actions");

/// Decode one list section. An absent section is an empty list.
fn section<T: FromJson>(reader: &RecordReader<'_>, field: &FieldSpec) -> DecodeResult<Vec<T>> {
    let items: Vec<T> = reader.optional(field)?.unwrap_or_default();
    debug!(
        section = field.external,
        count = items.len(),
        "Decoded catalog section"
    );
    Ok(items)
}

impl Record for CatalogMetadata {
    const SPEC: RecordSpec = RecordSpec {
        entity: "catalog metadata",
        fields: &[
            TABLES,
            RELATIONS,
            PERMISSIONS,
            EVENT_TRIGGERS,
            REMOTE_SCHEMAS,
            FUNCTIONS,
            ALLOWLIST,
            COMPUTED_FIELDS,
            CUSTOM_TYPES,
            ACTIONS,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            tables: section(reader, &TABLES)?,
            relations: section(reader, &RELATIONS)?,
            permissions: section(reader, &PERMISSIONS)?,
            event_triggers: section(reader, &EVENT_TRIGGERS)?,
            remote_schemas: section(reader, &REMOTE_SCHEMAS)?,
            functions: section(reader, &FUNCTIONS)?,
            allowlist: section(reader, &ALLOWLIST)?,
            computed_fields: section(reader, &COMPUTED_FIELDS)?,
            custom_types: reader.required(&CUSTOM_TYPES)?,
            actions: section(reader, &ACTIONS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&TABLES, &self.tables);
        writer.put(&RELATIONS, &self.relations);
        writer.put(&PERMISSIONS, &self.permissions);
        writer.put(&EVENT_TRIGGERS, &self.event_triggers);
        writer.put(&REMOTE_SCHEMAS, &self.remote_schemas);
        writer.put(&FUNCTIONS, &self.functions);
        writer.put(&ALLOWLIST, &self.allowlist);
        writer.put(&COMPUTED_FIELDS, &self.computed_fields);
        writer.put(&CUSTOM_TYPES, &self.custom_types);
        writer.put(&ACTIONS, &self.actions);
    }
}

json_record!(CatalogMetadata);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ToJson;
    use crate::error::DecodeError;
    use crate::ident::TableName;
    use serde_json::json;

    fn custom_types() -> serde_json::Value {
        json!({"custom_types": {}, "pg_scalars": []})
    }

    #[test]
    fn test_empty_snapshot() {
        let catalog = CatalogMetadata::from_json(&json!({
            "tables": [],
            "custom_types": custom_types()
        }))
        .unwrap();

        assert!(catalog.tables.is_empty());
        assert!(catalog.actions.is_empty());
        assert!(catalog.custom_types.definitions.is_empty());
        assert_eq!(catalog.summary(), CatalogSummary::default());
    }

    #[test]
    fn test_null_sections_are_empty() {
        let catalog = CatalogMetadata::from_json(&json!({
            "tables": null,
            "relations": null,
            "custom_types": custom_types()
        }))
        .unwrap();

        assert!(catalog.tables.is_empty());
        assert!(catalog.relations.is_empty());
    }

    #[test]
    fn test_unknown_sections_ignored() {
        let catalog = CatalogMetadata::from_json(&json!({
            "version": 3,
            "inherited_roles": [{"role_name": "manager", "role_set": ["user"]}],
            "tables": [],
            "custom_types": custom_types()
        }))
        .unwrap();

        assert_eq!(catalog.summary(), CatalogSummary::default());
        assert!(catalog.to_json().get("inherited_roles").is_none());
    }

    #[test]
    fn test_missing_custom_types() {
        let err = CatalogMetadata::from_json(&json!({"tables": []})).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::MissingField {
                field: "custom_types",
                ..
            }
        ));
    }

    #[test]
    fn test_non_object_document() {
        let err = CatalogMetadata::from_json(&json!([])).unwrap_err();
        assert!(err.to_string().contains("expected catalog metadata object"));
    }

    #[test]
    fn test_section_order_and_lookups() {
        let catalog = CatalogMetadata::from_json(&json!({
            "tables": [
                {"name": "orders", "is_system_defined": false, "is_enum": false,
                 "configuration": {"custom_root_fields": {}, "custom_column_names": {}}},
                {"name": "customers", "is_system_defined": false, "is_enum": false,
                 "configuration": {"custom_root_fields": {}, "custom_column_names": {}}}
            ],
            "relations": [
                {"table": "orders", "rel_name": "customer", "rel_type": "object", "def": {}},
                {"table": "customers", "rel_name": "orders", "rel_type": "array", "def": {}}
            ],
            "permissions": [
                {"table": "orders", "role": "user", "perm_type": "select", "def": {}},
                {"table": "orders", "role": "admin", "perm_type": "delete", "def": {}}
            ],
            "custom_types": custom_types()
        }))
        .unwrap();

        let orders = QualifiedTable::public(TableName::new("orders").unwrap());
        let names: Vec<String> = catalog.tables.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, vec!["public.orders", "public.customers"]);

        assert!(catalog.table(&orders).is_some());
        assert_eq!(catalog.relations_of(&orders).count(), 1);

        let admin = RoleName::new("admin").unwrap();
        assert_eq!(catalog.permissions_for(&admin).count(), 1);

        let summary = catalog.summary();
        assert_eq!(summary.tables, 2);
        assert_eq!(summary.tables_without_info, 2);
        assert_eq!(summary.relations, 2);
    }

    #[test]
    fn test_one_bad_section_fails_everything() {
        let err = CatalogMetadata::from_json(&json!({
            "tables": [],
            "event_triggers": [{"table": "orders", "name": "notify"}],
            "custom_types": custom_types()
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "missing required field `def` of event trigger at \
             event_triggers[0] (event trigger notify)"
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let catalog = CatalogMetadata::from_json(&json!({
            "relations": [{"table": "orders", "rel_name": "customer", "rel_type": "object",
                           "def": {"foreign_key_constraint_on": "customer_id"}}],
            "custom_types": {"custom_types": {"objects": []}, "pg_scalars": ["uuid"]}
        }))
        .unwrap();

        assert_eq!(CatalogMetadata::from_json(&catalog.to_json()).unwrap(), catalog);
    }
}
