//! Re-exports of `html-to-markdown-rs` configuration types used across this module.

use serde::{Deserialize, Serialize};

use crate::types::ExtractedImage;

pub use html_to_markdown_rs::{
    CodeBlockStyle, HeadingStyle, HighlightStyle, ListIndentType, NewlineStyle, PreprocessingOptions,
    PreprocessingPreset, WhitespaceMode,
};

/// Result of converting HTML to Markdown with optional inline image extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlExtractionResult {
    pub markdown: String,
    pub images: Vec<ExtractedImage>,
    pub warnings: Vec<String>,
}
