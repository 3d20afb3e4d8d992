//! Extraction configuration: `ExtractionConfig` and its nested option structs.
//!
//! This module defines the config shape only. Loading it from a file on disk
//! (discovery, env-var precedence, CLI overlay) is the caller's job.

pub mod extraction;
pub mod formats;
pub mod ocr;
pub mod page;
pub mod pdf;
pub mod processing;

// Re-export main types for convenient access as `core::config::*`.
pub use extraction::{
    ExtractionConfig, HtmlToMarkdownConfig, ImageExtractionConfig, JsonConfig, LanguageDetectionConfig, PdfPassword,
};
pub use formats::OutputFormat;
pub use ocr::OcrConfig;
pub use page::PageConfig;
#[cfg(feature = "pdf")]
pub use pdf::{HierarchyConfig, PdfConfig};
pub use processing::{ChunkerType, ChunkingConfig, PostProcessorConfig};
