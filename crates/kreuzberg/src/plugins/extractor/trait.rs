//! The `DocumentExtractor` plugin trait.

use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// A plugin that turns raw document bytes of a given MIME type into an [`ExtractionResult`].
///
/// Implementors are registered with [`crate::plugins::registry::get_document_extractor_registry`]
/// and looked up by MIME type. Only `extract_bytes` and `supported_mime_types` are required;
/// `extract_file` has a default implementation that reads the file and delegates to `extract_bytes`.
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract content from raw bytes already known to be `mime_type`.
    async fn extract_bytes(&self, content: &[u8], mime_type: &str, config: &ExtractionConfig)
    -> Result<ExtractionResult>;

    /// Extract content from a file on disk. Default implementation reads the
    /// whole file into memory and calls `extract_bytes`; override for formats
    /// where streaming or memory-mapping the file is worthwhile.
    async fn extract_file(&self, path: &Path, mime_type: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
        let content = tokio::fs::read(path).await?;
        self.extract_bytes(&content, mime_type, config).await
    }

    /// MIME types this extractor handles, used by the registry for lookup.
    /// A type ending in `/*` matches any MIME type with that prefix.
    fn supported_mime_types(&self) -> &[&str];

    /// Selection priority among extractors registered for overlapping MIME types.
    /// Higher values are informational only now: the registry tries extractors
    /// in registration order, not by priority. Defaults to 50.
    fn priority(&self) -> i32 {
        50
    }

    /// Whether this extractor can handle a given path/MIME type pair.
    /// Default implementation always returns `true`; override to inspect the
    /// path (e.g. file extension) in addition to the MIME type.
    fn can_handle(&self, _path: &Path, _mime_type: &str) -> bool {
        true
    }
}
