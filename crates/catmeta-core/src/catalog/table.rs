//! Tracked tables and their introspected structure.

use super::ForeignKey;
use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::{ColumnName, ConstraintName, Oid, QualifiedTable};
use std::collections::{BTreeMap, BTreeSet};

/// A column as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawColumn {
    /// Column name.
    pub name: ColumnName,
    /// Ordinal position within the table.
    pub position: i32,
    /// Database type name.
    pub column_type: String,
    /// Whether the column accepts nulls.
    pub is_nullable: bool,
    /// Column comment.
    pub description: Option<String>,
}

const COLUMN_NAME: FieldSpec = FieldSpec::required("name", "name");
const COLUMN_POSITION: FieldSpec = FieldSpec::required("position", "position");
const COLUMN_TYPE: FieldSpec = FieldSpec::required("column_type", "type");
const COLUMN_IS_NULLABLE: FieldSpec = FieldSpec::required("is_nullable", "is_nullable");
const COLUMN_DESCRIPTION: FieldSpec = FieldSpec::optional("description", "description");

impl Record for RawColumn {
    const SPEC: RecordSpec = RecordSpec {
        entity: "column",
        fields: &[
            COLUMN_NAME,
            COLUMN_POSITION,
            COLUMN_TYPE,
            COLUMN_IS_NULLABLE,
            COLUMN_DESCRIPTION,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: ColumnName = reader.required(&COLUMN_NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            position: reader.required(&COLUMN_POSITION)?,
            column_type: reader.required(&COLUMN_TYPE)?,
            is_nullable: reader.required(&COLUMN_IS_NULLABLE)?,
            description: reader.optional(&COLUMN_DESCRIPTION)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&COLUMN_NAME, &self.name);
        writer.put(&COLUMN_POSITION, &self.position);
        writer.put(&COLUMN_TYPE, &self.column_type);
        writer.put(&COLUMN_IS_NULLABLE, &self.is_nullable);
        writer.put_optional(&COLUMN_DESCRIPTION, &self.description);
    }
}

/// A table's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryKey {
    /// Constraint name.
    pub constraint: ConstraintName,
    /// Key columns in key order. Never empty.
    pub columns: Vec<ColumnName>,
}

const PK_CONSTRAINT: FieldSpec = FieldSpec::required("constraint", "constraint");
const PK_COLUMNS: FieldSpec = FieldSpec::required("columns", "columns");

impl Record for PrimaryKey {
    const SPEC: RecordSpec = RecordSpec {
        entity: "primary key",
        fields: &[PK_CONSTRAINT, PK_COLUMNS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let constraint: ConstraintName = reader.required(&PK_CONSTRAINT)?;
        reader.identify(&constraint);

        let columns: Vec<ColumnName> = reader.required(&PK_COLUMNS)?;
        if columns.is_empty() {
            return Err(reader.invariant("primary key has no columns"));
        }

        Ok(Self {
            constraint,
            columns,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&PK_CONSTRAINT, &self.constraint);
        writer.put(&PK_COLUMNS, &self.columns);
    }
}

/// A unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueConstraint {
    /// Constraint name.
    pub constraint: ConstraintName,
    /// Constrained columns.
    pub columns: Vec<ColumnName>,
}

const UNIQUE_CONSTRAINT: FieldSpec = FieldSpec::required("constraint", "constraint");
const UNIQUE_COLUMNS: FieldSpec = FieldSpec::required("columns", "columns");

impl Record for UniqueConstraint {
    const SPEC: RecordSpec = RecordSpec {
        entity: "unique constraint",
        fields: &[UNIQUE_CONSTRAINT, UNIQUE_COLUMNS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let constraint: ConstraintName = reader.required(&UNIQUE_CONSTRAINT)?;
        reader.identify(&constraint);

        Ok(Self {
            constraint,
            columns: reader.required(&UNIQUE_COLUMNS)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&UNIQUE_CONSTRAINT, &self.constraint);
        writer.put(&UNIQUE_COLUMNS, &self.columns);
    }
}

/// Mutability of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewInfo {
    pub is_updatable: bool,
    pub is_deletable: bool,
    pub is_insertable: bool,
}

const VIEW_IS_UPDATABLE: FieldSpec = FieldSpec::required("is_updatable", "is_updatable");
const VIEW_IS_DELETABLE: FieldSpec = FieldSpec::required("is_deletable", "is_deletable");
const VIEW_IS_INSERTABLE: FieldSpec = FieldSpec::required("is_insertable", "is_insertable");

impl Record for ViewInfo {
    const SPEC: RecordSpec = RecordSpec {
        entity: "view info",
        fields: &[VIEW_IS_UPDATABLE, VIEW_IS_DELETABLE, VIEW_IS_INSERTABLE],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            is_updatable: reader.required(&VIEW_IS_UPDATABLE)?,
            is_deletable: reader.required(&VIEW_IS_DELETABLE)?,
            is_insertable: reader.required(&VIEW_IS_INSERTABLE)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&VIEW_IS_UPDATABLE, &self.is_updatable);
        writer.put(&VIEW_IS_DELETABLE, &self.is_deletable);
        writer.put(&VIEW_IS_INSERTABLE, &self.is_insertable);
    }
}

/// Structure of a physical table, as introspected from the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableInfo {
    /// Table OID.
    pub oid: Oid,
    /// Columns in introspection order.
    pub columns: Vec<RawColumn>,
    /// Primary key, if the table has one.
    pub primary_key: Option<PrimaryKey>,
    /// Unique constraints other than the primary key.
    ///
    /// Introspection is expected to leave the primary key out of this set.
    /// Decoding does not check it.
    pub unique_constraints: BTreeSet<UniqueConstraint>,
    /// Outgoing foreign keys.
    pub foreign_keys: BTreeSet<ForeignKey>,
    /// Present only for views.
    pub view_info: Option<ViewInfo>,
    /// Table comment.
    pub description: Option<String>,
}

impl TableInfo {
    /// Look up a column by name.
    pub fn column(&self, name: &ColumnName) -> Option<&RawColumn> {
        self.columns.iter().find(|c| &c.name == name)
    }

    /// Check if this is a view.
    pub fn is_view(&self) -> bool {
        self.view_info.is_some()
    }
}

const INFO_OID: FieldSpec = FieldSpec::required("oid", "oid");
const INFO_COLUMNS: FieldSpec = FieldSpec::required("columns", "columns");
const INFO_PRIMARY_KEY: FieldSpec = FieldSpec::optional("primary_key", "primary_key");
const INFO_UNIQUE_CONSTRAINTS: FieldSpec =
    FieldSpec::required("unique_constraints", "unique_constraints");
const INFO_FOREIGN_KEYS: FieldSpec = FieldSpec::required("foreign_keys", "foreign_keys");
const INFO_VIEW_INFO: FieldSpec = FieldSpec::optional("view_info", "view_info");
const INFO_DESCRIPTION: FieldSpec = FieldSpec::optional("description", "description");

impl Record for TableInfo {
    const SPEC: RecordSpec = RecordSpec {
        entity: "table info",
        fields: &[
            INFO_OID,
            INFO_COLUMNS,
            INFO_PRIMARY_KEY,
            INFO_UNIQUE_CONSTRAINTS,
            INFO_FOREIGN_KEYS,
            INFO_VIEW_INFO,
            INFO_DESCRIPTION,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            oid: reader.required(&INFO_OID)?,
            columns: reader.required(&INFO_COLUMNS)?,
            primary_key: reader.optional(&INFO_PRIMARY_KEY)?,
            unique_constraints: reader.required(&INFO_UNIQUE_CONSTRAINTS)?,
            foreign_keys: reader.required(&INFO_FOREIGN_KEYS)?,
            view_info: reader.optional(&INFO_VIEW_INFO)?,
            description: reader.optional(&INFO_DESCRIPTION)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&INFO_OID, &self.oid);
        writer.put(&INFO_COLUMNS, &self.columns);
        writer.put_optional(&INFO_PRIMARY_KEY, &self.primary_key);
        writer.put(&INFO_UNIQUE_CONSTRAINTS, &self.unique_constraints);
        writer.put(&INFO_FOREIGN_KEYS, &self.foreign_keys);
        writer.put_optional(&INFO_VIEW_INFO, &self.view_info);
        writer.put_optional(&INFO_DESCRIPTION, &self.description);
    }
}

/// Custom GraphQL names for a table's root fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CustomRootFields {
    pub select: Option<String>,
    pub select_by_pk: Option<String>,
    pub select_aggregate: Option<String>,
    pub insert: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

const ROOT_SELECT: FieldSpec = FieldSpec::optional("select", "select");
const ROOT_SELECT_BY_PK: FieldSpec = FieldSpec::optional("select_by_pk", "select_by_pk");
const ROOT_SELECT_AGGREGATE: FieldSpec =
    FieldSpec::optional("select_aggregate", "select_aggregate");
const ROOT_INSERT: FieldSpec = FieldSpec::optional("insert", "insert");
const ROOT_UPDATE: FieldSpec = FieldSpec::optional("update", "update");
const ROOT_DELETE: FieldSpec = FieldSpec::optional("delete", "delete");

impl Record for CustomRootFields {
    const SPEC: RecordSpec = RecordSpec {
        entity: "custom root fields",
        fields: &[
            ROOT_SELECT,
            ROOT_SELECT_BY_PK,
            ROOT_SELECT_AGGREGATE,
            ROOT_INSERT,
            ROOT_UPDATE,
            ROOT_DELETE,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            select: reader.optional(&ROOT_SELECT)?,
            select_by_pk: reader.optional(&ROOT_SELECT_BY_PK)?,
            select_aggregate: reader.optional(&ROOT_SELECT_AGGREGATE)?,
            insert: reader.optional(&ROOT_INSERT)?,
            update: reader.optional(&ROOT_UPDATE)?,
            delete: reader.optional(&ROOT_DELETE)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put_optional(&ROOT_SELECT, &self.select);
        writer.put_optional(&ROOT_SELECT_BY_PK, &self.select_by_pk);
        writer.put_optional(&ROOT_SELECT_AGGREGATE, &self.select_aggregate);
        writer.put_optional(&ROOT_INSERT, &self.insert);
        writer.put_optional(&ROOT_UPDATE, &self.update);
        writer.put_optional(&ROOT_DELETE, &self.delete);
    }
}

/// Per-table configuration stored in metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableConfig {
    /// Root field overrides.
    pub custom_root_fields: CustomRootFields,
    /// Column to GraphQL field name overrides.
    pub custom_column_names: BTreeMap<ColumnName, String>,
}

const CONFIG_ROOT_FIELDS: FieldSpec =
    FieldSpec::required("custom_root_fields", "custom_root_fields");
const CONFIG_COLUMN_NAMES: FieldSpec =
    FieldSpec::required("custom_column_names", "custom_column_names");

impl Record for TableConfig {
    const SPEC: RecordSpec = RecordSpec {
        entity: "table configuration",
        fields: &[CONFIG_ROOT_FIELDS, CONFIG_COLUMN_NAMES],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            custom_root_fields: reader.required(&CONFIG_ROOT_FIELDS)?,
            custom_column_names: reader.required(&CONFIG_COLUMN_NAMES)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&CONFIG_ROOT_FIELDS, &self.custom_root_fields);
        writer.put(&CONFIG_COLUMN_NAMES, &self.custom_column_names);
    }
}

/// A tracked table.
///
/// `info` is `None` when the table is tracked in metadata but was not found
/// by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    /// Qualified table name.
    pub name: QualifiedTable,
    /// Whether the table belongs to the system's own catalog.
    pub is_system_defined: bool,
    /// Whether the table backs an enum type.
    pub is_enum: bool,
    /// Per-table configuration.
    pub configuration: TableConfig,
    /// Introspected structure.
    pub info: Option<TableInfo>,
}

impl Table {
    /// Check if the physical table was found by introspection.
    pub fn is_introspected(&self) -> bool {
        self.info.is_some()
    }
}

const TABLE_NAME: FieldSpec = FieldSpec::required("name", "name");
const TABLE_IS_SYSTEM_DEFINED: FieldSpec =
    FieldSpec::required("is_system_defined", "is_system_defined");
const TABLE_IS_ENUM: FieldSpec = FieldSpec::required("is_enum", "is_enum");
const TABLE_CONFIGURATION: FieldSpec = FieldSpec::required("configuration", "configuration");
const TABLE_INFO: FieldSpec = FieldSpec::optional("info", "info");

impl Record for Table {
    const SPEC: RecordSpec = RecordSpec {
        entity: "table",
        fields: &[
            TABLE_NAME,
            TABLE_IS_SYSTEM_DEFINED,
            TABLE_IS_ENUM,
            TABLE_CONFIGURATION,
            TABLE_INFO,
        ],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name: QualifiedTable = reader.required(&TABLE_NAME)?;
        reader.identify(&name);

        Ok(Self {
            name,
            is_system_defined: reader.required(&TABLE_IS_SYSTEM_DEFINED)?,
            is_enum: reader.required(&TABLE_IS_ENUM)?,
            configuration: reader.required(&TABLE_CONFIGURATION)?,
            info: reader.optional(&TABLE_INFO)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&TABLE_NAME, &self.name);
        writer.put(&TABLE_IS_SYSTEM_DEFINED, &self.is_system_defined);
        writer.put(&TABLE_IS_ENUM, &self.is_enum);
        writer.put(&TABLE_CONFIGURATION, &self.configuration);
        writer.put_optional(&TABLE_INFO, &self.info);
    }
}

json_record!(
    RawColumn,
    PrimaryKey,
    UniqueConstraint,
    ViewInfo,
    TableInfo,
    CustomRootFields,
    TableConfig,
    Table,
);
