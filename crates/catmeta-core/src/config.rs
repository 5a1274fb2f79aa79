//! Decoder configuration.

use serde::Deserialize;

/// Default limit on raw document size: 64 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

/// Configuration for [`CatalogDecoder`](crate::CatalogDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Reject raw documents larger than this many bytes before parsing.
    /// None means unlimited.
    pub max_document_bytes: Option<usize>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: Some(DEFAULT_MAX_DOCUMENT_BYTES),
        }
    }
}

impl DecodeConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with no size limit.
    pub fn unlimited() -> Self {
        Self {
            max_document_bytes: None,
        }
    }

    /// Set the maximum raw document size.
    pub fn with_max_document_bytes(mut self, limit: usize) -> Self {
        self.max_document_bytes = Some(limit);
        self
    }

    /// Check a raw document size against the configured limit.
    pub(crate) fn admits(&self, size: usize) -> bool {
        self.max_document_bytes.map_or(true, |limit| size <= limit)
    }
}
