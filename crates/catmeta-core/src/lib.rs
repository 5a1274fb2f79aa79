//! catmeta core - decoding and validation of catalog metadata snapshots.
//!
//! A snapshot is one JSON document describing every tracked table,
//! relationship, permission, event trigger, remote schema, function,
//! allow-list collection, computed field, custom type and action. Decoding
//! checks every entity's shape and field-level invariants and either yields
//! a complete [`CatalogMetadata`] or fails with a [`DecodeError`] locating
//! the offending value.

pub mod catalog;
pub mod config;
pub mod decode;
pub mod decoder;
pub mod error;
pub mod ident;
pub mod payload;

pub use catalog::{
    Action, ActionPermission, AllowlistCollection, CatalogMetadata, CatalogSummary,
    ColumnMapping, ComputedField, ComputedFieldDef, CustomRootFields, CustomTypeDefinitions,
    CustomTypes, EventTrigger, ForeignKey, Function, FunctionConfig, LengthMismatch,
    Permission, PermissionKind, PrimaryKey, RawColumn, RawFunction, Relation, RelationKind,
    RemoteSchema, Table, TableConfig, TableInfo, UniqueConstraint, ViewInfo, Volatility,
};
pub use config::DecodeConfig;
pub use decode::{FromJson, JsonPath, ToJson};
pub use decoder::{decode_catalog, CatalogDecoder};
pub use error::{DecodeError, DecodeResult};
pub use ident::{
    ActionName, CollectionName, ColumnName, ComputedFieldName, ConstraintName, FunctionName,
    IdentError, Oid, QualifiedFunction, QualifiedName, QualifiedTable, QualifiedType,
    RelationName, RemoteSchemaName, RoleName, SchemaName, TableName, TriggerName, TypeName,
};
pub use payload::Payload;
