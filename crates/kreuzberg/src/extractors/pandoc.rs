//! Pandoc-bridge extractor wrapper, covering the nine format families documented in
//! [`crate::extraction::pandoc`].

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::pandoc::{convert_bytes_via_pandoc, get_extension_from_mime, get_pandoc_format_from_mime};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatMetadata, Metadata};
use async_trait::async_trait;

/// Routes Markdown variants, legacy/OpenDocument office files, ebooks, structured text,
/// LaTeX/Typst, bibliographies, XML-based formats, and tabular data through `pandoc`.
pub struct PandocExtractor;

impl PandocExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PandocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PandocExtractor {
    fn name(&self) -> &str {
        "pandoc-extractor"
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
impl DocumentExtractor for PandocExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let from_format = get_pandoc_format_from_mime(mime_type)?;
        let extension = get_extension_from_mime(mime_type)?;

        let result = convert_bytes_via_pandoc(content, &from_format, &extension, config.extract_images).await?;

        Ok(ExtractionResult {
            content: result.content,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: Some(FormatMetadata::Pandoc(result.metadata)),
                ..Default::default()
            },
            tables: vec![],
            detected_languages: None,
            chunks: None,
            images: if result.images.is_empty() { None } else { Some(result.images) },
            document_type: None,
            image_ocr_results: None,
            pages: None,
            elements: None,
            djot_content: None,
        })
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[
            "text/markdown",
            "text/x-markdown",
            "text/x-gfm",
            "text/x-commonmark",
            "text/x-markdown-extra",
            "text/x-multimarkdown",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.oasis.opendocument.text",
            "application/rtf",
            "application/epub+zip",
            "application/x-fictionbook+xml",
            "text/x-rst",
            "text/x-org",
            "text/x-dokuwiki",
            "text/x-mdoc",
            "text/x-pod",
            "text/troff",
            "application/x-ipynb+json",
            "application/x-latex",
            "application/x-typst",
            "application/x-bibtex",
            "application/x-biblatex",
            "application/x-research-info-systems",
            "application/x-endnote+xml",
            "application/docbook+xml",
            "application/x-jats+xml",
            "application/x-opml+xml",
            "application/csl+json",
            "text/csv",
            "text/tab-separated-values",
        ]
    }

    fn priority(&self) -> i32 {
        50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_mime_types_cover_all_nine_families() {
        let extractor = PandocExtractor::new();
        let types = extractor.supported_mime_types();
        assert!(types.contains(&"text/markdown"));
        assert!(types.contains(&"application/epub+zip"));
        assert!(types.contains(&"application/x-bibtex"));
        assert!(types.contains(&"text/csv"));
    }

    #[test]
    fn plugin_interface() {
        let extractor = PandocExtractor::new();
        assert_eq!(extractor.name(), "pandoc-extractor");
        assert_eq!(extractor.priority(), 50);
    }

    #[tokio::test]
    async fn extract_bytes_rejects_unmapped_mime_type() {
        let extractor = PandocExtractor::new();
        let config = ExtractionConfig::default();
        let result = extractor.extract_bytes(b"content", "application/unknown", &config).await;
        assert!(result.is_err());
    }
}
