//! Plugin system: extractors, OCR backends, post-processors and validators.
//!
//! Every plugin kind shares the same base [`Plugin`] trait (identity, version,
//! lifecycle) and is looked up through a registry in [`registry`]. Built-in
//! implementations live alongside their registries (`extractors::*` for
//! `DocumentExtractor`, `ocr::tesseract_backend` for `OcrBackend`, `chunking::processor`
//! for `PostProcessor`); third-party plugins register through the same entry points.

pub mod extractor;
pub mod ocr;
pub mod processor;
pub mod registry;
pub mod validator;

pub use extractor::DocumentExtractor;
pub use ocr::{OcrBackend, OcrBackendType};
pub use processor::{PostProcessor, ProcessingStage};
pub use validator::Validator;

use crate::Result;

/// Identity and lifecycle shared by every plugin kind.
pub trait Plugin: Send + Sync {
    /// Unique plugin name, used as the registry key.
    fn name(&self) -> &str;

    /// Plugin version string, for diagnostics only.
    fn version(&self) -> String;

    /// Called once when the plugin is registered. Return an error to abort registration.
    fn initialize(&self) -> Result<()>;

    /// Called when the plugin is removed from its registry or the registry is shut down.
    fn shutdown(&self) -> Result<()>;
}
