//! Image extractor: dimensions/format/EXIF metadata, plus OCR text when configured.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::image::extract_image_metadata;
use crate::plugins::registry::get_ocr_backend_registry;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatMetadata, Metadata};
use async_trait::async_trait;

/// Reads image dimensions, format, and EXIF tags, and runs OCR over the image
/// when the extraction config carries an [`crate::core::config::ocr::OcrConfig`].
pub struct ImageExtractor;

impl ImageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ImageExtractor {
    fn name(&self) -> &str {
        "image-extractor"
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
impl DocumentExtractor for ImageExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let image_meta = extract_image_metadata(content)?;

        let (text, tables) = if let Some(ocr_config) = &config.ocr {
            let backend = {
                let registry = get_ocr_backend_registry();
                let registry = registry.read().map_err(|e| crate::KreuzbergError::Plugin {
                    message: format!("Failed to acquire read lock on OCR backend registry: {}", e),
                    plugin_name: "ocr-registry".to_string(),
                })?;
                registry.get(&ocr_config.backend)?
            };
            let ocr_result = backend.process_image(content, ocr_config).await?;
            (ocr_result.content, ocr_result.tables)
        } else {
            (String::new(), Vec::new())
        };

        Ok(ExtractionResult {
            content: text,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: Some(FormatMetadata::Image(crate::types::ImageMetadata {
                    width: image_meta.width,
                    height: image_meta.height,
                    format: image_meta.format,
                    exif: image_meta.exif_data,
                })),
                ..Default::default()
            },
            tables,
            detected_languages: None,
            chunks: None,
            images: None,
            document_type: None,
            image_ocr_results: None,
            pages: None,
            elements: None,
            djot_content: None,
        })
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[
            "image/png",
            "image/jpeg",
            "image/gif",
            "image/bmp",
            "image/tiff",
            "image/webp",
            "image/jp2",
            "image/jpx",
            "image/jpm",
            "image/mj2",
        ]
    }

    fn priority(&self) -> i32 {
        50
    }
}
