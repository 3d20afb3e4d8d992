//! Output format configuration and validation.
//!
//! This module defines the `OutputFormat` enum for controlling how extraction
//! results are formatted (plain text, markdown, HTML, etc.) and provides
//! serialization/deserialization support.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output format for extraction results.
///
/// Controls the format of the `content` field in `ExtractionResult`.
/// When set to `Markdown`, `Djot`, or `Html`, the output will be formatted
/// accordingly. `Plain` returns the raw extracted text.
/// `Structured` returns JSON with full OCR element data including bounding
/// boxes and confidence scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text content only (default)
    #[default]
    Plain,
    /// Markdown format
    Markdown,
    /// Djot markup format (requires djot feature)
    Djot,
    /// HTML format
    Html,
    /// Structured JSON format with full OCR element metadata.
    ///
    /// This format preserves all spatial and confidence information from
    /// the OCR backend, including bounding boxes (rectangles or quadrilaterals),
    /// detection and recognition confidence scores, rotation information,
    /// and hierarchical element levels.
    ///
    /// Ideal for:
    /// - Layout analysis and document understanding
    /// - Searchable PDF generation
    /// - Building custom document viewers
    /// - Extracting maximum information from OCR results
    Structured,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Djot => write!(f, "djot"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Structured => write!(f, "structured"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "djot" => Ok(OutputFormat::Djot),
            "html" => Ok(OutputFormat::Html),
            "structured" | "json" => Ok(OutputFormat::Structured),
            _ => Err(format!(
                "Invalid output format: '{}'. Valid formats: plain, text, markdown, md, djot, html, structured, json",
                s
            )),
        }
    }
}
