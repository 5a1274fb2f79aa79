//! catmeta Command-Line Validator
//!
//! Decodes a catalog metadata snapshot and reports either a summary of its
//! contents or the normalized document. Exits with status 1 when the
//! snapshot is rejected.

mod error;
mod formatter;

use catmeta_core::{CatalogDecoder, DecodeConfig};
use clap::Parser;
use error::CliError;
use formatter::OutputFormat;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// catmeta Command-Line Validator
#[derive(Parser, Debug)]
#[command(name = "catmeta")]
#[command(version, about = "Validate catalog metadata snapshots")]
pub struct Args {
    /// Snapshot file, or `-` for standard input
    #[arg(default_value = "-")]
    pub input: String,

    /// Output format
    #[arg(long, default_value = "summary", value_enum)]
    pub format: OutputFormat,

    /// Reject documents larger than this many bytes
    #[arg(long)]
    pub max_bytes: Option<usize>,

    /// Decoder configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level for catmeta crates
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) -> Result<(), CliError> {
    let mut filter = EnvFilter::from_default_env();
    for target in ["catmeta", "catmeta_core"] {
        let directive: Directive = format!("{}={}", target, level)
            .parse()
            .map_err(|_| CliError::LogLevel(level.to_string()))?;
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DecodeConfig::default(),
    };
    if let Some(limit) = args.max_bytes {
        config = config.with_max_document_bytes(limit);
    }

    let bytes = read_input(&args.input)?;
    tracing::debug!(input = %args.input, size = bytes.len(), "Read snapshot");

    let decoder = CatalogDecoder::new(config);
    let catalog = decoder.decode_slice(&bytes).map_err(CliError::from)?;

    println!("{}", formatter::format_catalog(&catalog, args.format)?);
    Ok(())
}

/// Load decoder settings from a JSON file.
fn load_config(path: &Path) -> Result<DecodeConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Config {
        path: path.display().to_string(),
        source,
    })
}

/// Read the snapshot from a file or standard input.
fn read_input(input: &str) -> Result<Vec<u8>, CliError> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(buf);
    }

    std::fs::read(input).map_err(|source| CliError::Read {
        path: input.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["catmeta"]);
        assert_eq!(args.input, "-");
        assert_eq!(args.format, OutputFormat::Summary);
        assert_eq!(args.log_level, "warn");
        assert!(args.max_bytes.is_none());
    }

    #[test]
    fn test_explicit_args() {
        let args = Args::parse_from([
            "catmeta",
            "snapshot.json",
            "--format",
            "json",
            "--max-bytes",
            "1024",
        ]);
        assert_eq!(args.input, "snapshot.json");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.max_bytes, Some(1024));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input("/nonexistent/catmeta/snapshot.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catmeta/snapshot.json"));
    }
}
