//! OCR configuration.
//!
//! Defines OCR-specific configuration including backend selection, language settings,
//! and Tesseract-specific parameters.

use serde::{Deserialize, Serialize};

use super::formats::OutputFormat;
use crate::error::KreuzbergError;
use crate::types::OcrElementConfig;

/// OCR backends recognized by `ocr_backend` (§3): tesseract, easyocr, paddleocr, or
/// none to disable document OCR entirely.
const SUPPORTED_OCR_BACKENDS: &[&str] = &["tesseract", "easyocr", "paddleocr", "none"];

/// OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// OCR backend: tesseract, easyocr, paddleocr
    #[serde(default = "default_tesseract_backend")]
    pub backend: String,

    /// Language code (e.g., "eng", "deu")
    #[serde(default = "default_eng")]
    pub language: String,

    /// Tesseract-specific configuration (optional)
    #[serde(default)]
    pub tesseract_config: Option<crate::types::TesseractConfig>,

    /// Output format for OCR results (optional, for format conversion)
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// PaddleOCR-specific configuration (optional, JSON passthrough)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paddle_ocr_config: Option<serde_json::Value>,

    /// OCR element extraction configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_config: Option<OcrElementConfig>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: default_tesseract_backend(),
            language: default_eng(),
            tesseract_config: None,
            output_format: None,
            paddle_ocr_config: None,
            element_config: None,
        }
    }
}

impl OcrConfig {
    /// Validates that the configured backend is supported.
    ///
    /// This method checks that the backend name is one of the supported OCR backends:
    /// - tesseract
    /// - easyocr
    /// - paddleocr
    ///
    /// Typos in backend names are caught at configuration validation time, not at runtime.
    ///
    /// # Errors
    ///
    /// Returns a `KreuzbergError::Validation` if the backend is not recognized.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use kreuzberg::core::config::OcrConfig;
    ///
    /// let config = OcrConfig {
    ///     backend: "tesseract".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_ok());
    ///
    /// let bad_config = OcrConfig {
    ///     backend: "typo_backend".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// assert!(bad_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), KreuzbergError> {
        if SUPPORTED_OCR_BACKENDS.contains(&self.backend.as_str()) {
            Ok(())
        } else {
            Err(KreuzbergError::validation(format!(
                "Unsupported OCR backend '{}'. Supported backends: {}",
                self.backend,
                SUPPORTED_OCR_BACKENDS.join(", ")
            )))
        }
    }
}

fn default_tesseract_backend() -> String {
    "tesseract".to_string()
}

fn default_eng() -> String {
    "eng".to_string()
}
