//! Archive extractors (ZIP, TAR, 7Z).
//!
//! Each archive is listed in full (every entry, size, compressed size where
//! available) and every text-extension entry is read back as content, joined in
//! archive order.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::archive::{
    extract_7z_metadata, extract_7z_text_content, extract_tar_metadata, extract_tar_text_content, extract_zip_metadata,
    extract_zip_text_content,
};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ArchiveMetadata, ExtractionResult, FormatMetadata, Metadata};
use async_trait::async_trait;
use std::collections::HashMap;

fn join_text_content(metadata: &ArchiveMetadata, contents: &HashMap<String, String>) -> String {
    let mut sections = Vec::with_capacity(contents.len());
    for path in &metadata.file_list {
        if let Some(text) = contents.get(path) {
            sections.push(format!("--- {path} ---\n{text}"));
        }
    }
    sections.join("\n\n")
}

/// Extracts entry listings and text-file content from ZIP archives.
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ZipExtractor {
    fn name(&self) -> &str {
        "zip-extractor"
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
impl DocumentExtractor for ZipExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let metadata = extract_zip_metadata(content)?;
        let text_content = extract_zip_text_content(content)?;
        let joined = join_text_content(&metadata, &text_content);

        Ok(ExtractionResult {
            content: joined,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata { format: Some(FormatMetadata::Archive(metadata)), ..Default::default() },
            tables: vec![],
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
        &["application/zip"]
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Extracts entry listings and text-file content from TAR archives.
pub struct TarExtractor;

impl TarExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TarExtractor {
    fn name(&self) -> &str {
        "tar-extractor"
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
impl DocumentExtractor for TarExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let metadata = extract_tar_metadata(content)?;
        let text_content = extract_tar_text_content(content)?;
        let joined = join_text_content(&metadata, &text_content);

        Ok(ExtractionResult {
            content: joined,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata { format: Some(FormatMetadata::Archive(metadata)), ..Default::default() },
            tables: vec![],
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
        &["application/x-tar"]
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Extracts entry listings and text-file content from 7z archives.
pub struct SevenZExtractor;

impl SevenZExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SevenZExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SevenZExtractor {
    fn name(&self) -> &str {
        "7z-extractor"
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
impl DocumentExtractor for SevenZExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let metadata = extract_7z_metadata(content)?;
        let text_content = extract_7z_text_content(content)?;
        let joined = join_text_content(&metadata, &text_content);

        Ok(ExtractionResult {
            content: joined,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata { format: Some(FormatMetadata::Archive(metadata)), ..Default::default() },
            tables: vec![],
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
        &["application/x-7z-compressed"]
    }

    fn priority(&self) -> i32 {
        50
    }
}
