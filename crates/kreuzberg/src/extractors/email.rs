//! Email extractor (.eml, .msg).

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::extraction::email::{build_email_text_output, extract_email_content};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{EmailMetadata, ExtractionResult, FormatMetadata, Metadata};
use async_trait::async_trait;

/// Extracts content and headers from RFC822 (.eml) and Outlook (.msg) email files.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for EmailExtractor {
    fn name(&self) -> &str {
        "email-extractor"
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
impl DocumentExtractor for EmailExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let email_result = extract_email_content(content, mime_type)?;
        let text_output = build_email_text_output(&email_result);

        let from_name = email_result.metadata.get("from_name").cloned();
        let attachments = email_result
            .attachments
            .iter()
            .filter_map(|att| att.name.clone().or_else(|| att.filename.clone()))
            .collect();

        Ok(ExtractionResult {
            content: text_output,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: Some(FormatMetadata::Email(EmailMetadata {
                    from_email: email_result.from_email,
                    from_name,
                    to_emails: email_result.to_emails,
                    cc_emails: email_result.cc_emails,
                    bcc_emails: email_result.bcc_emails,
                    message_id: email_result.message_id,
                    attachments,
                })),
                ..Default::default()
            },
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
        &["message/rfc822", "application/vnd.ms-outlook"]
    }

    fn priority(&self) -> i32 {
        50
    }
}
