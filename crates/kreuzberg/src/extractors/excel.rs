//! Excel and spreadsheet extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::error::KreuzbergError;
use crate::extraction::excel::{excel_to_markdown, read_excel_bytes};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExcelMetadata, ExtractionResult, FormatMetadata, Metadata, Table};
use async_trait::async_trait;

/// Extracts text and tables from modern/legacy Excel workbooks and OpenDocument
/// spreadsheets, converting every sheet to a Markdown table via `calamine`.
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
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

fn extension_from_mime(mime_type: &str) -> Result<&'static str> {
    match mime_type {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Ok("xlsx"),
        "application/vnd.ms-excel" => Ok("xls"),
        "application/vnd.ms-excel.sheet.macroEnabled.12" => Ok("xlsm"),
        "application/vnd.ms-excel.sheet.binary.macroEnabled.12" => Ok("xlsb"),
        "application/vnd.ms-excel.addin.macroEnabled.12" => Ok("xlam"),
        "application/vnd.ms-excel.template.macroEnabled.12" => Ok("xla"),
        "application/vnd.oasis.opendocument.spreadsheet" => Ok("ods"),
        other => Err(KreuzbergError::validation(format!("unsupported Excel MIME type: {other}"))),
    }
}

#[async_trait]
impl DocumentExtractor for ExcelExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let extension = extension_from_mime(mime_type)?;
        let workbook = read_excel_bytes(content, extension)?;

        let markdown = excel_to_markdown(&workbook);
        let tables = workbook
            .sheets
            .iter()
            .enumerate()
            .filter_map(|(index, sheet)| {
                sheet.table_cells.clone().map(|cells| Table {
                    cells,
                    markdown: sheet.markdown.clone(),
                    page_number: index + 1,
                })
            })
            .collect();

        Ok(ExtractionResult {
            content: markdown,
            mime_type: mime_type.to_string().into(),
            metadata: Metadata {
                format: Some(FormatMetadata::Excel(ExcelMetadata {
                    sheet_count: workbook.sheets.len(),
                    sheet_names: workbook.sheets.iter().map(|sheet| sheet.name.clone()).collect(),
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
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "application/vnd.ms-excel",
            "application/vnd.ms-excel.sheet.macroEnabled.12",
            "application/vnd.ms-excel.sheet.binary.macroEnabled.12",
            "application/vnd.ms-excel.addin.macroEnabled.12",
            "application/vnd.ms-excel.template.macroEnabled.12",
            "application/vnd.oasis.opendocument.spreadsheet",
        ]
    }

    fn priority(&self) -> i32 {
        50
    }
}
