//! Output formatters for decoded snapshots.

use catmeta_core::{CatalogMetadata, Table as CatalogTable, ToJson};
use clap::ValueEnum;
use comfy_table::{Cell, Table};

/// Output format for a decoded snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Entity counts and a table listing
    Summary,
    /// Normalized JSON document
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a snapshot in the requested format.
pub fn format_catalog(
    catalog: &CatalogMetadata,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Summary => Ok(format_summary(catalog)),
        OutputFormat::Json => serde_json::to_string_pretty(&catalog.to_json()),
    }
}

fn format_summary(catalog: &CatalogMetadata) -> String {
    let summary = catalog.summary();

    let mut counts = Table::new();
    counts.set_header(vec!["Section", "Count"]);
    let rows = [
        ("tables", summary.tables),
        ("relations", summary.relations),
        ("permissions", summary.permissions),
        ("event_triggers", summary.event_triggers),
        ("remote_schemas", summary.remote_schemas),
        ("functions", summary.functions),
        ("allowlist", summary.allowlist),
        ("computed_fields", summary.computed_fields),
        ("custom_types", summary.custom_types),
        ("actions", summary.actions),
    ];
    for (section, count) in rows {
        counts.add_row(vec![Cell::new(section), Cell::new(count)]);
    }

    let mut output = counts.to_string();

    if !catalog.tables.is_empty() {
        let mut tables = Table::new();
        tables.set_header(vec!["Table", "Kind", "Columns", "Foreign keys"]);
        for table in &catalog.tables {
            let (columns, foreign_keys) = match &table.info {
                Some(info) => (
                    info.columns.len().to_string(),
                    info.foreign_keys.len().to_string(),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            tables.add_row(vec![
                Cell::new(&table.name),
                Cell::new(table_kind(table)),
                Cell::new(columns),
                Cell::new(foreign_keys),
            ]);
        }
        output.push_str("\n\n");
        output.push_str(&tables.to_string());
    }

    if summary.tables_without_info > 0 {
        output.push_str(&format!(
            "\n\n{} tracked table(s) missing from the database",
            summary.tables_without_info
        ));
    }

    output
}

fn table_kind(table: &CatalogTable) -> &'static str {
    match &table.info {
        None => "missing",
        Some(_) if table.is_enum => "enum",
        Some(info) if info.is_view() => "view",
        Some(_) => "table",
    }
}
