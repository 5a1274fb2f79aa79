//! Catalog entities and the snapshot that aggregates them.
//!
//! Each entity is a plain immutable value decoded from one JSON object.
//! Opaque sub-documents (relation definitions, permission filters, action
//! handlers) are kept as [`Payload`](crate::payload::Payload) and never
//! interpreted here.

mod action;
mod allowlist;
mod computed_field;
mod custom_types;
mod event_trigger;
mod foreign_key;
pub(crate) mod function;
mod metadata;
mod permission;
mod relation;
mod remote_schema;
mod table;

pub use action::{Action, ActionPermission};
pub use allowlist::AllowlistCollection;
pub use computed_field::{ComputedField, ComputedFieldDef};
pub use custom_types::{CustomTypeDefinitions, CustomTypes};
pub use event_trigger::EventTrigger;
pub use foreign_key::{ColumnMapping, ForeignKey, LengthMismatch};
pub use function::{Function, FunctionConfig, RawFunction, Volatility};
pub use metadata::{CatalogMetadata, CatalogSummary};
pub use permission::{Permission, PermissionKind};
pub use relation::{Relation, RelationKind};
pub use remote_schema::RemoteSchema;
pub use table::{
    CustomRootFields, PrimaryKey, RawColumn, Table, TableConfig, TableInfo, UniqueConstraint,
    ViewInfo,
};
