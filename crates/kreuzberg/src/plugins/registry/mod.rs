//! Global plugin registries.
//!
//! Each plugin kind (extractor, OCR backend, post-processor, validator) has its
//! own registry type and a process-wide singleton accessor. The document
//! extractor registry uses interior locking (`parking_lot::RwLock` per list plus
//! a `DashMap` lookup cache, see [`extractor::DocumentExtractorRegistry`]) since
//! extraction calls look it up on every invocation; the other three are guarded
//! by a single outer `std::sync::RwLock` since they're consulted far less often
//! (once per pipeline run, not once per MIME lookup).

mod extractor;
mod ocr;
mod processor;
mod validator;

pub use extractor::DocumentExtractorRegistry;
pub use ocr::OcrBackendRegistry;
pub use processor::PostProcessorRegistry;
pub use validator::ValidatorRegistry;

use crate::KreuzbergError;
use std::sync::{OnceLock, RwLock};

/// Reject plugin names that are empty or contain whitespace.
///
/// Names are used as registry keys and appear in error messages and logs;
/// keeping them whitespace-free avoids ambiguity in both contexts.
pub(super) fn validate_plugin_name(name: &str) -> crate::Result<()> {
    if name.is_empty() {
        return Err(KreuzbergError::validation("Plugin name cannot be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(KreuzbergError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(())
}

/// The process-wide document extractor registry.
///
/// Populated with the built-in extractors on first access by
/// [`crate::extractors::register_default_extractors`].
pub fn get_document_extractor_registry() -> &'static DocumentExtractorRegistry {
    static REGISTRY: OnceLock<DocumentExtractorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(DocumentExtractorRegistry::new)
}

/// The process-wide OCR backend registry.
///
/// Initialized with the built-in backends enabled by the crate's feature flags
/// (Tesseract, optionally PaddleOCR); see [`OcrBackendRegistry::new`].
pub fn get_ocr_backend_registry() -> &'static RwLock<OcrBackendRegistry> {
    static REGISTRY: OnceLock<RwLock<OcrBackendRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(OcrBackendRegistry::new()))
}

/// The process-wide post-processor registry.
///
/// Starts empty; built-in post-processors (chunking, language detection,
/// quality scoring) register themselves the first time their owning module is
/// used.
pub fn get_post_processor_registry() -> &'static RwLock<PostProcessorRegistry> {
    static REGISTRY: OnceLock<RwLock<PostProcessorRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(PostProcessorRegistry::new()))
}

/// The process-wide validator registry.
///
/// Starts empty; callers register custom validators explicitly, there are no
/// built-in ones.
pub fn get_validator_registry() -> &'static RwLock<ValidatorRegistry> {
    static REGISTRY: OnceLock<RwLock<ValidatorRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(ValidatorRegistry::new()))
}
