//! HTML extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::html::{convert_html_to_markdown_with_metadata, process_html};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatMetadata, Metadata};
use async_trait::async_trait;

/// Maximum size of an inline (base64/data-URI) image extracted from HTML.
const MAX_INLINE_IMAGE_SIZE: u64 = 1024 * 1024;

/// Converts HTML documents to Markdown, optionally extracting inline images and
/// page metadata (title, description, keywords, canonical URL, ...).
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for HtmlExtractor {
    fn name(&self) -> &str {
        "html-extractor"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl DocumentExtractor for HtmlExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let html = String::from_utf8_lossy(content);
        let (markdown, html_metadata) = convert_html_to_markdown_with_metadata(&html, None, None)?;

        let images = if config.extract_images {
            let extracted = process_html(&html, None, true, MAX_INLINE_IMAGE_SIZE)?;
            if extracted.images.is_empty() { None } else { Some(extracted.images) }
        } else {
            None
        };

        Ok(ExtractionResult {
            content: markdown,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: html_metadata.map(|m| FormatMetadata::Html(Box::new(m))),
                ..Default::default()
            },
            tables: vec![],
            detected_languages: None,
            chunks: None,
            images,
            document_type: None,
            image_ocr_results: None,
            pages: None,
            elements: None,
            djot_content: None,
        })
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["text/html", "application/xhtml+xml"]
    }

    fn priority(&self) -> i32 {
        50
    }
}
