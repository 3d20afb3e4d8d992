//! Post-processor that chunks the final extracted content when requested.

use async_trait::async_trait;

use crate::core::config::ExtractionConfig;
use crate::plugins::{PostProcessor, ProcessingStage};
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use crate::Result;

use super::core::chunk_text;

/// Splits `ExtractionResult::content` into `ExtractionResult::chunks` when
/// `ExtractionConfig::chunk_content` is set. Runs last among post-processors so it sees
/// whatever text normalization and page-boundary detection earlier stages produced.
pub struct ChunkingProcessor;

impl Plugin for ChunkingProcessor {
    fn name(&self) -> &str {
        "text-chunking"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl PostProcessor for ChunkingProcessor {
    async fn process(&self, result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()> {
        if !config.chunk_content || result.content.is_empty() {
            return Ok(());
        }

        let page_boundaries = result.metadata.pages.as_ref().and_then(|pages| pages.boundaries.clone());

        let chunking_result = chunk_text(&result.content, &config.chunking, page_boundaries.as_deref())?;

        result.chunks = Some(chunking_result.chunks);
        Ok(())
    }

    fn processing_stage(&self) -> ProcessingStage {
        ProcessingStage::Late
    }

    fn should_process(&self, result: &ExtractionResult, config: &ExtractionConfig) -> bool {
        config.chunk_content && !result.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use std::borrow::Cow;

    fn result_with_content(content: &str) -> ExtractionResult {
        ExtractionResult {
            content: content.to_string(),
            mime_type: Cow::Borrowed("text/plain"),
            metadata: Metadata::default(),
            tables: vec![],
            detected_languages: None,
            chunks: None,
            images: None,
            djot_content: None,
            document_type: None,
            image_ocr_results: None,
            pages: None,
            elements: None,
        }
    }

    #[tokio::test]
    async fn skips_when_chunk_content_disabled() {
        let processor = ChunkingProcessor;
        let mut result = result_with_content("some content");
        let config = ExtractionConfig { chunk_content: false, ..Default::default() };

        processor.process(&mut result, &config).await.unwrap();
        assert!(result.chunks.is_none());
    }

    #[tokio::test]
    async fn populates_chunks_when_enabled() {
        let processor = ChunkingProcessor;
        let mut result = result_with_content("Some test content that is long enough to matter.");
        let config = ExtractionConfig { chunk_content: true, ..Default::default() };

        processor.process(&mut result, &config).await.unwrap();
        assert!(result.chunks.is_some());
        assert!(!result.chunks.unwrap().is_empty());
    }

    #[tokio::test]
    async fn skips_when_content_is_empty() {
        let processor = ChunkingProcessor;
        let mut result = result_with_content("");
        let config = ExtractionConfig { chunk_content: true, ..Default::default() };

        processor.process(&mut result, &config).await.unwrap();
        assert!(result.chunks.is_none());
    }
}
