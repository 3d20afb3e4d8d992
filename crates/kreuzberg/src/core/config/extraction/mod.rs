//! The core extraction configuration: the recognized option set for all extractors.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::formats::OutputFormat;
use super::ocr::OcrConfig;
use super::page::PageConfig;
#[cfg(feature = "pdf")]
use super::pdf::PdfConfig;
use super::processing::{ChunkingConfig, PostProcessorConfig};

/// PDF (and password-protected archive) decryption attempts.
///
/// A single password is tried first; a list is tried in order, falling back to an
/// empty password last, matching how most scanned-document workflows hand out a
/// shared password but occasionally ship an unprotected file too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PdfPassword {
    Single(String),
    List(Vec<String>),
}

impl PdfPassword {
    /// Iterate candidate passwords in the order they should be tried.
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            PdfPassword::Single(s) => vec![s.as_str()],
            PdfPassword::List(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

/// Embedded-image OCR gating: format allowlist and dimension bounds.
///
/// Separate from the top-level document OCR settings because embedded images
/// (figures inside a PDF or PPTX) are usually much smaller and noisier than a
/// scanned page, so callers tend to want a different backend and size cutoffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageExtractionConfig {
    /// Image formats eligible for OCR (e.g. "png", "jpeg").
    #[serde(default = "default_image_ocr_formats")]
    pub formats: HashSet<String>,

    /// Minimum (width, height) in pixels; images smaller are skipped.
    #[serde(default)]
    pub min_dimensions: Option<(u32, u32)>,

    /// Maximum (width, height) in pixels; images larger are skipped.
    #[serde(default)]
    pub max_dimensions: Option<(u32, u32)>,
}

impl Default for ImageExtractionConfig {
    fn default() -> Self {
        Self {
            formats: default_image_ocr_formats(),
            min_dimensions: None,
            max_dimensions: None,
        }
    }
}

fn default_image_ocr_formats() -> HashSet<String> {
    ["png", "jpeg", "jpg", "gif", "bmp", "tiff", "webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Language detection configuration (`whatlang`-backed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDetectionConfig {
    /// Whether to run language detection on extracted text.
    #[serde(default)]
    pub enabled: bool,

    /// Minimum confidence required to report a detected language.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Restrict detection to this set of candidate languages (ISO 639-3), if any.
    #[serde(default)]
    pub allowed_languages: Option<HashSet<String>>,
}

impl Default for LanguageDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_confidence: default_min_confidence(),
            allowed_languages: None,
        }
    }
}

fn default_min_confidence() -> f64 {
    0.8
}

/// Knobs for HTML-to-Markdown conversion, mirrored onto `html_to_markdown_rs::ConversionOptions`
/// at call time rather than exposed as a passthrough struct, so misconfiguration is caught by
/// serde rather than by the conversion library at first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlToMarkdownConfig {
    /// Parse YAML frontmatter / meta tags into `HtmlMetadata`.
    #[serde(default = "default_true")]
    pub extract_metadata: bool,

    /// Detect table structure from hOCR-style spatial positioning.
    #[serde(default)]
    pub hocr_spatial_tables: bool,

    /// Run HTML preprocessing (boilerplate stripping) before conversion.
    #[serde(default)]
    pub preprocessing_enabled: bool,
}

impl Default for HtmlToMarkdownConfig {
    fn default() -> Self {
        Self {
            extract_metadata: true,
            hocr_spatial_tables: false,
            preprocessing_enabled: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// JSON/YAML/TOML structured-data extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConfig {
    /// Maximum nesting depth to flatten before truncating with a placeholder.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Include array indices in flattened keys (`parent.child[0]`) rather than
    /// collapsing arrays to a single joined value.
    #[serde(default = "default_true")]
    pub flatten_arrays: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            flatten_arrays: true,
        }
    }
}

fn default_max_depth() -> usize {
    10
}

/// The recognized, immutable option set for a single extraction call.
///
/// Every field carries a `#[serde(default)]` so configuration fragments merge cleanly;
/// loading this from a file on disk (discovery, env-var precedence, CLI overlay) is out
/// of scope for this crate, which only defines the struct shape and in-memory builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Bypass searchable-text extraction on PDFs and always run OCR.
    #[serde(default)]
    pub force_ocr: bool,

    /// Document OCR engine selector: "tesseract", "easyocr", "paddleocr", or "none".
    #[serde(default = "default_ocr_backend")]
    pub ocr_backend: String,

    /// Backend-specific OCR parameters (language, tesseract config, etc.).
    #[serde(default)]
    pub ocr_config: OcrConfig,

    /// Extract tables from the document.
    #[serde(default = "default_true")]
    pub extract_tables: bool,

    /// Extract embedded images from the document.
    #[serde(default)]
    pub extract_images: bool,

    /// Run OCR on extracted embedded images.
    #[serde(default)]
    pub ocr_extracted_images: bool,

    /// Override the OCR backend used for embedded images (defaults to `ocr_backend`).
    #[serde(default)]
    pub image_ocr_backend: Option<String>,

    /// Embedded-image OCR format/dimension gating.
    #[serde(default)]
    pub image_ocr_config: ImageExtractionConfig,

    /// Drop duplicate images (same content fingerprint) before OCR/output.
    #[serde(default = "default_true")]
    pub deduplicate_images: bool,

    /// Run the quality engine's cleanup and scoring pass over extracted text.
    #[serde(default = "default_true")]
    pub enable_quality_processing: bool,

    /// Reuse cached extraction results for unchanged input.
    #[serde(default)]
    pub use_cache: bool,

    /// PDF password(s) to try, in order, before falling back to an empty password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_password: Option<PdfPassword>,

    /// Split extracted content into overlapping chunks.
    #[serde(default)]
    pub chunk_content: bool,

    /// Chunking parameters, used only when `chunk_content` is set.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// HTML-to-Markdown conversion options.
    #[serde(default)]
    pub html_to_markdown_config: HtmlToMarkdownConfig,

    /// Language detection options.
    #[serde(default)]
    pub language_detection_config: LanguageDetectionConfig,

    /// Structured-data (JSON/YAML/TOML) extraction options.
    #[serde(default)]
    pub json_config: JsonConfig,

    /// Concurrency cap for `batch_extract_file`/`batch_extract_bytes`. Defaults to
    /// `num_cpus * 1.5` (rounded up) when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_extractions: Option<usize>,

    /// Post-processor enable/allow/deny-list overrides. `None` runs every
    /// registered post-processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postprocessor: Option<PostProcessorConfig>,

    /// Output format applied to the result's `content` field once extraction
    /// and all post-processing stages finish.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Per-page/per-slide boundary tracking. `None` disables it entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageConfig>,

    /// PDF-specific extraction options (hierarchy extraction, passwords, etc.).
    #[cfg(feature = "pdf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_options: Option<PdfConfig>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            force_ocr: false,
            ocr_backend: default_ocr_backend(),
            ocr_config: OcrConfig::default(),
            extract_tables: true,
            extract_images: false,
            ocr_extracted_images: false,
            image_ocr_backend: None,
            image_ocr_config: ImageExtractionConfig::default(),
            deduplicate_images: true,
            enable_quality_processing: true,
            use_cache: false,
            pdf_password: None,
            chunk_content: false,
            chunking: ChunkingConfig::default(),
            html_to_markdown_config: HtmlToMarkdownConfig::default(),
            language_detection_config: LanguageDetectionConfig::default(),
            json_config: JsonConfig::default(),
            max_concurrent_extractions: None,
            postprocessor: None,
            output_format: OutputFormat::default(),
            pages: None,
            #[cfg(feature = "pdf")]
            pdf_options: None,
        }
    }
}

fn default_ocr_backend() -> String {
    "tesseract".to_string()
}

const SUPPORTED_EXTRACTION_OCR_BACKENDS: &[&str] = &["tesseract", "easyocr", "paddleocr", "none"];

impl ExtractionConfig {
    /// Validates nested config and the top-level OCR backend selector (which also
    /// accepts "none", unlike `OcrConfig::validate` which only covers engine names).
    pub fn validate(&self) -> Result<(), crate::error::KreuzbergError> {
        if !SUPPORTED_EXTRACTION_OCR_BACKENDS.contains(&self.ocr_backend.as_str()) {
            return Err(crate::error::KreuzbergError::validation(format!(
                "Unsupported OCR backend '{}'. Supported backends: {}",
                self.ocr_backend,
                SUPPORTED_EXTRACTION_OCR_BACKENDS.join(", ")
            )));
        }
        if self.ocr_backend != "none" {
            self.ocr_config.validate()?;
        }
        Ok(())
    }
}
