//! PowerPoint (.pptx, .pptm, .ppsx) extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::pptx::extract_pptx_from_bytes;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatMetadata, Metadata, PptxMetadata};
use async_trait::async_trait;

/// Extracts slide text, structure, and embedded images from PowerPoint presentations.
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PptxExtractor {
    fn name(&self) -> &str {
        "pptx-extractor"
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
impl DocumentExtractor for PptxExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let result = extract_pptx_from_bytes(content, config.extract_images, config.pages.as_ref())?;

        Ok(ExtractionResult {
            content: result.content,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: Some(FormatMetadata::Pptx(PptxMetadata {
                    slide_count: result.metadata.slide_count,
                    slide_names: result.metadata.slide_names,
                })),
                ..Default::default()
            },
            tables: vec![],
            detected_languages: None,
            chunks: None,
            images: if result.images.is_empty() { None } else { Some(result.images) },
            document_type: None,
            image_ocr_results: None,
            pages: result.page_contents,
            elements: None,
            djot_content: None,
        })
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "application/vnd.openxmlformats-officedocument.presentationml.slideshow",
            "application/vnd.ms-powerpoint.presentation.macroEnabled.12",
        ]
    }

    fn priority(&self) -> i32 {
        50
    }
}
