//! HTML to Markdown conversion functions.
//!
//! This module provides HTML to Markdown conversion using the `html-to-markdown-rs` library.
//! It supports inline image extraction and direct metadata extraction.
//!
//! # Example
//!
//! ```rust
//! use kreuzberg::extraction::html::convert_html_to_markdown;
//!
//! # fn example() -> kreuzberg::Result<()> {
//! let html = r#"<h1>Title</h1><p>This is <strong>bold</strong> text.</p>"#;
//! let markdown = convert_html_to_markdown(html, None, None)?;
//!
//! assert!(markdown.contains("# Title"));
//! assert!(markdown.contains("**bold**"));
//! # Ok(())
//! # }
//! ```

mod converter;
mod image_handling;
mod processor;
mod stack_management;
mod types;

pub use converter::{convert_html_to_markdown, convert_html_to_markdown_with_metadata};
pub use processor::process_html;
pub use types::{
    CodeBlockStyle, HeadingStyle, HighlightStyle, HtmlExtractionResult, ListIndentType, NewlineStyle,
    PreprocessingOptions, PreprocessingPreset, WhitespaceMode,
};
