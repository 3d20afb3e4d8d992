//! Feature processing logic.
//!
//! This module handles feature-specific processing like chunking,
//! quality cleanup, and language detection.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::types::ExtractionResult;
use std::borrow::Cow;

/// Execute chunking if configured.
pub(super) fn execute_chunking(result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()> {
    #[cfg(feature = "chunking")]
    if let Some(ref chunking_config) = config.chunking {
        let page_boundaries = result.metadata.pages.as_ref().and_then(|ps| ps.boundaries.as_deref());

        match crate::chunking::chunk_text(&result.content, chunking_config, page_boundaries) {
            Ok(chunking_result) => {
                result.chunks = Some(chunking_result.chunks);

                if let Some(ref chunks) = result.chunks {
                    result.metadata.additional.insert(
                        Cow::Borrowed("chunk_count"),
                        serde_json::Value::Number(serde_json::Number::from(chunks.len())),
                    );
                }
            }
            Err(e) => {
                result.metadata.additional.insert(
                    Cow::Borrowed("chunking_error"),
                    serde_json::Value::String(e.to_string()),
                );
            }
        }
    }

    #[cfg(not(feature = "chunking"))]
    if config.chunking.is_some() {
        result.metadata.additional.insert(
            Cow::Borrowed("chunking_error"),
            serde_json::Value::String("Chunking feature not enabled".to_string()),
        );
    }

    Ok(())
}

/// Run the quality engine's cleanup and scoring pass over the extracted text.
pub(super) fn execute_quality_processing(result: &mut ExtractionResult, config: &ExtractionConfig) {
    #[cfg(feature = "quality")]
    if config.enable_quality_processing {
        let cleaned = crate::utils::clean_extracted_text(&result.content);
        let score = crate::utils::calculate_quality_score(&cleaned, None);
        result.content = cleaned;
        result
            .metadata
            .additional
            .insert(Cow::Borrowed("quality_score"), serde_json::json!(score));
    }

    #[cfg(not(feature = "quality"))]
    if config.enable_quality_processing {
        result.metadata.additional.insert(
            Cow::Borrowed("quality_processing_error"),
            serde_json::Value::String("Quality feature not enabled".to_string()),
        );
    }
}

/// Execute language detection if configured.
pub(super) fn execute_language_detection(result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()> {
    #[cfg(feature = "language-detection")]
    if let Some(ref lang_config) = config.language_detection {
        match crate::language_detection::detect_languages(&result.content, lang_config) {
            Ok(detected) => {
                result.detected_languages = detected;
            }
            Err(e) => {
                result.metadata.additional.insert(
                    Cow::Borrowed("language_detection_error"),
                    serde_json::Value::String(e.to_string()),
                );
            }
        }
    }

    #[cfg(not(feature = "language-detection"))]
    if config.language_detection.is_some() {
        result.metadata.additional.insert(
            Cow::Borrowed("language_detection_error"),
            serde_json::Value::String("Language detection feature not enabled".to_string()),
        );
    }

    Ok(())
}
