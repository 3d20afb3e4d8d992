//! The `OcrBackend` plugin trait.

use crate::core::config::OcrConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;

/// Backend family, mostly for diagnostics and registry introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackendType {
    Tesseract,
    EasyOcr,
    PaddleOcr,
    /// Any backend registered outside the built-in set.
    Custom,
}

/// A plugin that runs OCR over a single image and returns its text as an [`ExtractionResult`].
///
/// Backends are registered in [`crate::plugins::registry::get_ocr_backend_registry`]
/// and selected by name (`ExtractionConfig::ocr_backend`) or by language support.
#[async_trait]
pub trait OcrBackend: Plugin {
    /// Run OCR over `image_bytes`, a single already-decoded image.
    async fn process_image(&self, image_bytes: &[u8], config: &OcrConfig) -> Result<ExtractionResult>;

    /// Whether this backend can OCR the given language code (e.g. "eng", "deu").
    fn supports_language(&self, language: &str) -> bool;

    /// Which backend family this is.
    fn backend_type(&self) -> OcrBackendType;

    /// Languages this backend supports, if enumerable. Defaults to empty.
    fn supported_languages(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether this backend can detect table structure in the OCR output. Defaults to `false`.
    fn supports_table_detection(&self) -> bool {
        false
    }
}
