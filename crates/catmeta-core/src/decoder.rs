//! Snapshot decoding entry points.

use crate::catalog::CatalogMetadata;
use crate::config::DecodeConfig;
use crate::decode::FromJson;
use crate::error::{DecodeError, DecodeResult};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Decodes catalog metadata snapshots.
///
/// Stateless apart from its configuration; a single decoder may be shared
/// across threads and reused for every snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogDecoder {
    config: DecodeConfig,
}

impl CatalogDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode a snapshot from raw JSON bytes.
    #[instrument(skip_all, fields(size = bytes.len()))]
    pub fn decode_slice(&self, bytes: &[u8]) -> DecodeResult<CatalogMetadata> {
        if !self.config.admits(bytes.len()) {
            let limit = self.config.max_document_bytes.unwrap_or(usize::MAX);
            debug!(size = bytes.len(), limit, "Rejected oversized catalog document");
            return Err(DecodeError::DocumentTooLarge {
                size: bytes.len(),
                limit,
            });
        }

        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            debug!(error = %e, "Catalog document is not valid JSON");
            DecodeError::from(e)
        })?;
        self.decode_value(&value)
    }

    /// Decode a snapshot from a JSON string.
    pub fn decode_str(&self, text: &str) -> DecodeResult<CatalogMetadata> {
        self.decode_slice(text.as_bytes())
    }

    /// Decode a snapshot from an already parsed document.
    #[instrument(skip_all)]
    pub fn decode_value(&self, value: &Value) -> DecodeResult<CatalogMetadata> {
        let start = Instant::now();

        match CatalogMetadata::from_json(value) {
            Ok(catalog) => {
                let summary = catalog.summary();
                info!(
                    tables = summary.tables,
                    relations = summary.relations,
                    permissions = summary.permissions,
                    functions = summary.functions,
                    actions = summary.actions,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Catalog snapshot decoded"
                );
                Ok(catalog)
            }
            Err(e) => {
                debug!(
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Catalog snapshot rejected"
                );
                Err(e)
            }
        }
    }
}

/// Decode a snapshot with the default configuration.
pub fn decode_catalog(value: &Value) -> DecodeResult<CatalogMetadata> {
    CatalogDecoder::default().decode_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINIMAL: &str = r#"{"tables": [], "custom_types": {"custom_types": {}, "pg_scalars": []}}"#;

    #[test]
    fn test_decode_str() {
        let catalog = CatalogDecoder::default().decode_str(MINIMAL).unwrap();
        assert!(catalog.tables.is_empty());
    }

    #[test]
    fn test_decode_catalog_value() {
        let value = json!({"custom_types": {"custom_types": {}, "pg_scalars": ["int4"]}});
        let catalog = decode_catalog(&value).unwrap();
        assert_eq!(catalog.custom_types.builtin_scalars.len(), 1);
    }

    #[test]
    fn test_invalid_json() {
        let err = CatalogDecoder::default().decode_str("{\"tables\": [").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_document_too_large() {
        let decoder = CatalogDecoder::new(DecodeConfig::new().with_max_document_bytes(8));
        let err = decoder.decode_str(MINIMAL).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::DocumentTooLarge { limit: 8, .. }
        ));
        assert_eq!(
            err.to_string(),
            format!(
                "document of {} bytes exceeds the limit of 8 bytes",
                MINIMAL.len()
            )
        );
    }

    #[test]
    fn test_limit_not_applied_to_values() {
        let decoder = CatalogDecoder::new(DecodeConfig::new().with_max_document_bytes(1));
        let value: Value = serde_json::from_str(MINIMAL).unwrap();
        assert!(decoder.decode_value(&value).is_ok());
    }

    #[test]
    fn test_decoder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogDecoder>();
        assert_send_sync::<CatalogMetadata>();
        assert_send_sync::<DecodeError>();
    }
}
