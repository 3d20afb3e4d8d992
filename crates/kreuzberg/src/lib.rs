//! Kreuzberg: document intelligence for Rust.
//!
//! Extracts text, metadata, tables and images from PDFs, Office documents,
//! images, email messages, archives and more, behind a single async/sync API.
//! Format support is feature-gated (see `Cargo.toml`); extractors register
//! themselves into [`plugins::registry`] on first use via [`extractors::ensure_initialized`].
//!
//! ```no_run
//! # async fn run() -> kreuzberg::Result<()> {
//! use kreuzberg::{extract_file, ExtractionConfig};
//!
//! let result = extract_file("document.pdf", &ExtractionConfig::default()).await?;
//! println!("{}", result.content);
//! # Ok(())
//! # }
//! ```

pub mod chunking;
pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod image;
#[cfg(feature = "language-detection")]
pub mod language_detection;
pub mod ocr;
pub mod panic_context;
pub mod pdf;
pub mod plugins;
pub mod text;
pub mod types;
pub mod utils;

pub use error::{KreuzbergError, Result};
pub use types::*;

pub use core::{
    batch_extract_bytes, batch_extract_bytes_sync, batch_extract_file, batch_extract_file_sync, extract_bytes,
    extract_bytes_sync, extract_file, extract_file_sync,
};

pub use core::config::{
    ChunkerType, ChunkingConfig, ExtractionConfig, HtmlToMarkdownConfig, ImageExtractionConfig, JsonConfig,
    LanguageDetectionConfig, OcrConfig, OutputFormat, PageConfig, PdfPassword, PostProcessorConfig,
};

#[cfg(feature = "pdf")]
pub use core::config::{HierarchyConfig, PdfConfig};

pub use core::mime::{
    detect_mime_type, detect_mime_type_from_bytes, detect_or_validate, validate_mime_type, DOCX_MIME_TYPE,
    EML_MIME_TYPE, EXCEL_BINARY_2007_MIME_TYPE, EXCEL_BINARY_MIME_TYPE, EXCEL_MACRO_MIME_TYPE, EXCEL_MIME_TYPE,
    HTML_MIME_TYPE, JSON_MIME_TYPE, LEGACY_POWERPOINT_MIME_TYPE, LEGACY_WORD_MIME_TYPE, MARKDOWN_MIME_TYPE,
    MSG_MIME_TYPE, OPENDOC_SPREADSHEET_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, POWER_POINT_MIME_TYPE,
    SVG_MIME_TYPE, TOML_MIME_TYPE, XML_MIME_TYPE, XML_TEXT_MIME_TYPE, YAML_MIME_TYPE,
};

pub use plugins::{DocumentExtractor, OcrBackend, OcrBackendType, Plugin, PostProcessor, ProcessingStage, Validator};
