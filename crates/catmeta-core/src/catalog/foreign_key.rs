//! Foreign key descriptors.

use crate::decode::{json_record, FieldSpec, Record, RecordReader, RecordSpec, RecordWriter};
use crate::error::DecodeResult;
use crate::ident::{ColumnName, ConstraintName, QualifiedTable};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Local and remote column lists of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("columns and foreign_columns differ in length ({local} vs {remote})")]
pub struct LengthMismatch {
    /// Number of local columns.
    pub local: usize,
    /// Number of remote columns.
    pub remote: usize,
}

/// Ordered mapping from local columns to the remote columns they reference.
///
/// Entry order follows the constraint's column order, so equality, ordering,
/// and hashing are all order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping(IndexMap<ColumnName, ColumnName>);

impl ColumnMapping {
    /// Pair two column lists positionally.
    ///
    /// A repeated local column keeps its first position and takes the last
    /// remote column paired with it.
    pub fn try_zip(
        local: Vec<ColumnName>,
        remote: Vec<ColumnName>,
    ) -> Result<Self, LengthMismatch> {
        if local.len() != remote.len() {
            return Err(LengthMismatch {
                local: local.len(),
                remote: remote.len(),
            });
        }
        Ok(Self(local.into_iter().zip(remote).collect()))
    }

    /// Number of mapped columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remote column referenced by a local column.
    pub fn get(&self, local: &ColumnName) -> Option<&ColumnName> {
        self.0.get(local)
    }

    /// Iterate `(local, remote)` pairs in constraint order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnName, &ColumnName)> {
        self.0.iter()
    }

    /// Local columns in constraint order.
    pub fn local_columns(&self) -> Vec<ColumnName> {
        self.0.keys().cloned().collect()
    }

    /// Remote columns in constraint order.
    pub fn remote_columns(&self) -> Vec<ColumnName> {
        self.0.values().cloned().collect()
    }
}

impl PartialEq for ColumnMapping {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for ColumnMapping {}

impl PartialOrd for ColumnMapping {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColumnMapping {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().cmp(other.0.iter())
    }
}

impl Hash for ColumnMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for (local, remote) in &self.0 {
            local.hash(state);
            remote.hash(state);
        }
    }
}

/// A foreign key constraint on an introspected table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForeignKey {
    /// Constraint name.
    pub constraint: ConstraintName,
    /// Referenced table.
    pub foreign_table: QualifiedTable,
    /// Local to remote column pairs.
    pub column_mapping: ColumnMapping,
}

const CONSTRAINT: FieldSpec = FieldSpec::required("constraint", "constraint");
const FOREIGN_TABLE: FieldSpec = FieldSpec::required("foreign_table", "foreign_table");
const COLUMNS: FieldSpec = FieldSpec::required("column_mapping", "columns");
const FOREIGN_COLUMNS: FieldSpec = FieldSpec::required("column_mapping", "foreign_columns");

impl Record for ForeignKey {
    const SPEC: RecordSpec = RecordSpec {
        entity: "foreign key",
        fields: &[CONSTRAINT, FOREIGN_TABLE, COLUMNS, FOREIGN_COLUMNS],
    };

    fn read(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let constraint: ConstraintName = reader.required(&CONSTRAINT)?;
        reader.identify(&constraint);

        let foreign_table = reader.required(&FOREIGN_TABLE)?;
        let columns = reader.required(&COLUMNS)?;
        let foreign_columns = reader.required(&FOREIGN_COLUMNS)?;
        let column_mapping = ColumnMapping::try_zip(columns, foreign_columns)
            .map_err(|e| reader.invariant(e.to_string()))?;

        Ok(Self {
            constraint,
            foreign_table,
            column_mapping,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.put(&CONSTRAINT, &self.constraint);
        writer.put(&FOREIGN_TABLE, &self.foreign_table);
        writer.put(&COLUMNS, &self.column_mapping.local_columns());
        writer.put(&FOREIGN_COLUMNS, &self.column_mapping.remote_columns());
    }
}

json_record!(ForeignKey);
