//! MIME type detection and validation.
//!
//! Detects MIME types from file extensions and magic bytes, and validates them
//! against the set of formats this crate's extractors know how to handle.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;

use crate::{KreuzbergError, Result};

pub const HTML_MIME_TYPE: &str = "text/html";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const POWER_POINT_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
pub const LEGACY_POWERPOINT_MIME_TYPE: &str = "application/vnd.ms-powerpoint";

pub const EML_MIME_TYPE: &str = "message/rfc822";
pub const MSG_MIME_TYPE: &str = "application/vnd.ms-outlook";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const YAML_MIME_TYPE: &str = "application/x-yaml";
pub const TOML_MIME_TYPE: &str = "application/toml";
pub const XML_MIME_TYPE: &str = "application/xml";
pub const XML_TEXT_MIME_TYPE: &str = "text/xml";
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXCEL_BINARY_MIME_TYPE: &str = "application/vnd.ms-excel";
pub const EXCEL_MACRO_MIME_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.12";
pub const EXCEL_BINARY_2007_MIME_TYPE: &str = "application/vnd.ms-excel.sheet.binary.macroEnabled.12";
pub const EXCEL_ADDON_MIME_TYPE: &str = "application/vnd.ms-excel.addin.macroEnabled.12";
pub const EXCEL_TEMPLATE_MIME_TYPE: &str = "application/vnd.ms-excel.template.macroEnabled.12";

pub const OPENDOC_SPREADSHEET_MIME_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("md", MARKDOWN_MIME_TYPE);
    m.insert("markdown", MARKDOWN_MIME_TYPE);

    m.insert("pdf", PDF_MIME_TYPE);

    m.insert("html", HTML_MIME_TYPE);
    m.insert("htm", HTML_MIME_TYPE);

    m.insert("xlsx", EXCEL_MIME_TYPE);
    m.insert("xls", EXCEL_BINARY_MIME_TYPE);
    m.insert("xlsm", EXCEL_MACRO_MIME_TYPE);
    m.insert("xlsb", EXCEL_BINARY_2007_MIME_TYPE);
    m.insert("xlam", EXCEL_ADDON_MIME_TYPE);
    m.insert("xla", EXCEL_TEMPLATE_MIME_TYPE);
    m.insert("ods", OPENDOC_SPREADSHEET_MIME_TYPE);

    m.insert("pptx", POWER_POINT_MIME_TYPE);
    m.insert("ppt", LEGACY_POWERPOINT_MIME_TYPE);

    m.insert("docx", DOCX_MIME_TYPE);
    m.insert("doc", LEGACY_WORD_MIME_TYPE);
    m.insert("odt", "application/vnd.oasis.opendocument.text");

    m.insert("bmp", "image/bmp");
    m.insert("gif", "image/gif");
    m.insert("jpg", "image/jpeg");
    m.insert("jpeg", "image/jpeg");
    m.insert("png", "image/png");
    m.insert("tiff", "image/tiff");
    m.insert("tif", "image/tiff");
    m.insert("webp", "image/webp");
    m.insert("jp2", "image/jp2");
    m.insert("jpx", "image/jpx");
    m.insert("jpm", "image/jpm");
    m.insert("mj2", "image/mj2");
    m.insert("pnm", "image/x-portable-anymap");
    m.insert("pbm", "image/x-portable-bitmap");
    m.insert("pgm", "image/x-portable-graymap");
    m.insert("ppm", "image/x-portable-pixmap");

    m.insert("csv", "text/csv");
    m.insert("tsv", "text/tab-separated-values");
    m.insert("json", JSON_MIME_TYPE);
    m.insert("yaml", YAML_MIME_TYPE);
    m.insert("yml", YAML_MIME_TYPE);
    m.insert("toml", TOML_MIME_TYPE);
    m.insert("xml", XML_MIME_TYPE);
    m.insert("svg", SVG_MIME_TYPE);

    m.insert("eml", EML_MIME_TYPE);
    m.insert("msg", MSG_MIME_TYPE);

    m.insert("zip", "application/zip");
    m.insert("tar", "application/x-tar");
    m.insert("gz", "application/gzip");
    m.insert("tgz", "application/x-tar");
    m.insert("7z", "application/x-7z-compressed");

    m.insert("rst", "text/x-rst");
    m.insert("org", "text/x-org");
    m.insert("epub", "application/epub+zip");
    m.insert("rtf", "application/rtf");
    m.insert("bib", "application/x-bibtex");
    m.insert("ipynb", "application/x-ipynb+json");
    m.insert("tex", "application/x-latex");
    m.insert("latex", "application/x-latex");

    m
});

static SUPPORTED_MIME_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();

    set.insert(PLAIN_TEXT_MIME_TYPE);
    set.insert(MARKDOWN_MIME_TYPE);
    set.insert("text/x-markdown");

    set.insert("image/bmp");
    set.insert("image/gif");
    set.insert("image/jp2");
    set.insert("image/jpeg");
    set.insert("image/jpm");
    set.insert("image/jpx");
    set.insert("image/mj2");
    set.insert("image/pjpeg");
    set.insert("image/png");
    set.insert("image/tiff");
    set.insert("image/webp");
    set.insert("image/x-bmp");
    set.insert("image/x-ms-bmp");
    set.insert("image/x-portable-anymap");
    set.insert("image/x-portable-bitmap");
    set.insert("image/x-portable-graymap");
    set.insert("image/x-portable-pixmap");
    set.insert("image/x-tiff");

    set.insert("application/epub+zip");
    set.insert("application/rtf");
    set.insert("application/vnd.oasis.opendocument.text");
    set.insert(DOCX_MIME_TYPE);
    set.insert("application/x-bibtex");
    set.insert("application/x-ipynb+json");
    set.insert("application/x-latex");
    set.insert("text/csv");
    set.insert("text/tab-separated-values");
    set.insert("text/x-rst");
    set.insert("text/x-org");

    set.insert(EXCEL_MIME_TYPE);
    set.insert(EXCEL_BINARY_MIME_TYPE);
    set.insert(EXCEL_MACRO_MIME_TYPE);
    set.insert(EXCEL_BINARY_2007_MIME_TYPE);
    set.insert(EXCEL_ADDON_MIME_TYPE);
    set.insert(EXCEL_TEMPLATE_MIME_TYPE);
    set.insert(OPENDOC_SPREADSHEET_MIME_TYPE);

    set.insert(PDF_MIME_TYPE);
    set.insert(POWER_POINT_MIME_TYPE);
    set.insert(LEGACY_WORD_MIME_TYPE);
    set.insert(LEGACY_POWERPOINT_MIME_TYPE);
    set.insert(HTML_MIME_TYPE);
    set.insert(EML_MIME_TYPE);
    set.insert(MSG_MIME_TYPE);
    set.insert(JSON_MIME_TYPE);
    set.insert("text/json");
    set.insert(YAML_MIME_TYPE);
    set.insert("text/yaml");
    set.insert("text/x-yaml");
    set.insert("application/yaml");
    set.insert(TOML_MIME_TYPE);
    set.insert("text/toml");
    set.insert(XML_MIME_TYPE);
    set.insert(XML_TEXT_MIME_TYPE);
    set.insert(SVG_MIME_TYPE);

    set.insert("application/zip");
    set.insert("application/x-zip-compressed");
    set.insert("application/x-tar");
    set.insert("application/tar");
    set.insert("application/x-gtar");
    set.insert("application/x-ustar");
    set.insert("application/x-7z-compressed");

    set
});

/// Every MIME type this crate recognizes, used to pre-warm the MIME string interning
/// pool so the common cases never pay for a first-touch allocation.
pub static KNOWN_MIME_TYPES: Lazy<Vec<&'static str>> =
    Lazy::new(|| SUPPORTED_MIME_TYPES.iter().copied().collect());

/// Detect a MIME type from a file's extension, falling back to `mime_guess`.
pub fn detect_mime_type(path: impl AsRef<Path>, check_exists: bool) -> Result<String> {
    let path = path.as_ref();

    if check_exists && !path.exists() {
        return Err(KreuzbergError::validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase());

    if let Some(ext) = &extension
        && let Some(mime_type) = EXT_TO_MIME.get(ext.as_str())
    {
        return Ok(mime_type.to_string());
    }

    if let Some(guess) = mime_guess::from_path(path).first() {
        return Ok(guess.to_string());
    }

    if let Some(ext) = extension {
        return Err(KreuzbergError::UnsupportedFormat(format!("Unknown extension: .{ext}")));
    }

    Err(KreuzbergError::validation(format!(
        "Could not determine MIME type from file path: {}",
        path.display()
    )))
}

/// Detect a MIME type from raw bytes using magic-number sniffing.
///
/// ZIP-based Office formats (DOCX/XLSX/PPTX) are disambiguated from a plain ZIP by
/// scanning for their format-identifying marker entries.
pub fn detect_mime_type_from_bytes(content: &[u8]) -> Result<String> {
    if let Some(kind) = infer::get(content) {
        let mime_type = kind.mime_type();

        if mime_type == "application/zip"
            && let Some(office_mime) = detect_office_format_from_zip(content)
        {
            return Ok(office_mime.to_string());
        }

        if SUPPORTED_MIME_TYPES.contains(mime_type) || mime_type.starts_with("image/") {
            return Ok(mime_type.to_string());
        }
    }

    if let Ok(text) = std::str::from_utf8(content) {
        let trimmed = text.trim_start();

        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && serde_json::from_str::<serde_json::Value>(text).is_ok()
        {
            return Ok(JSON_MIME_TYPE.to_string());
        }

        if trimmed.starts_with("<?xml") || trimmed.starts_with('<') {
            return Ok(XML_MIME_TYPE.to_string());
        }

        if trimmed.starts_with("<!DOCTYPE html") || trimmed.starts_with("<html") {
            return Ok(HTML_MIME_TYPE.to_string());
        }

        if trimmed.starts_with("%PDF") {
            return Ok(PDF_MIME_TYPE.to_string());
        }

        return Ok(PLAIN_TEXT_MIME_TYPE.to_string());
    }

    Err(KreuzbergError::UnsupportedFormat(
        "Could not determine MIME type from bytes".to_string(),
    ))
}

fn detect_office_format_from_zip(content: &[u8]) -> Option<&'static str> {
    const DOCX_MARKER: &[u8] = b"word/document.xml";
    const XLSX_MARKER: &[u8] = b"xl/workbook.xml";
    const PPTX_MARKER: &[u8] = b"ppt/presentation.xml";

    if contains_subsequence(content, DOCX_MARKER) {
        return Some(DOCX_MIME_TYPE);
    }
    if contains_subsequence(content, XLSX_MARKER) {
        return Some(EXCEL_MIME_TYPE);
    }
    if contains_subsequence(content, PPTX_MARKER) {
        return Some(POWER_POINT_MIME_TYPE);
    }

    None
}

#[inline]
fn contains_subsequence(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Validate that a MIME type is one this crate's extractors support.
///
/// Any `image/*` type is accepted even if not in the known set, since the image
/// extractor delegates format support to the underlying decoder.
pub fn validate_mime_type(mime_type: &str) -> Result<String> {
    if SUPPORTED_MIME_TYPES.contains(mime_type) {
        return Ok(mime_type.to_string());
    }

    if mime_type.starts_with("image/") {
        return Ok(mime_type.to_string());
    }

    Err(KreuzbergError::UnsupportedFormat(mime_type.to_string()))
}

/// Validate an explicit MIME type, or detect one from `path` when none is given.
pub fn detect_or_validate(path: Option<&Path>, mime_type: Option<&str>) -> Result<String> {
    if let Some(mime) = mime_type {
        validate_mime_type(mime)
    } else if let Some(p) = path {
        let detected = detect_mime_type(p, true)?;
        validate_mime_type(&detected)
    } else {
        Err(KreuzbergError::validation(
            "Must provide either path or mime_type".to_string(),
        ))
    }
}

/// Look up the file extensions associated with a MIME type.
pub fn get_extensions_for_mime(mime_type: &str) -> Result<Vec<String>> {
    let mut extensions: Vec<String> =
        EXT_TO_MIME.iter().filter(|(_, mime)| **mime == mime_type).map(|(ext, _)| ext.to_string()).collect();

    if !extensions.is_empty() {
        extensions.sort();
        return Ok(extensions);
    }

    if let Some(exts) = mime_guess::get_mime_extensions_str(mime_type) {
        return Ok(exts.iter().map(|s| s.to_string()).collect());
    }

    Err(KreuzbergError::UnsupportedFormat(mime_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn detects_mime_type_from_extension() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.pdf");
        File::create(&file_path).unwrap();

        assert_eq!(detect_mime_type(&file_path, true).unwrap(), PDF_MIME_TYPE);
    }

    #[test]
    fn extensions_are_case_insensitive() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.PDF");
        File::create(&file_path).unwrap();

        assert_eq!(detect_mime_type(&file_path, true).unwrap(), PDF_MIME_TYPE);
    }

    #[test]
    fn missing_file_is_rejected_when_check_exists() {
        let result = detect_mime_type("/nonexistent/file.pdf", true);
        assert!(result.is_err());
    }

    #[test]
    fn validates_known_and_image_mime_types() {
        assert!(validate_mime_type(PDF_MIME_TYPE).is_ok());
        assert!(validate_mime_type("image/custom-format").is_ok());
        assert!(validate_mime_type("application/unknown").is_err());
    }

    #[test]
    fn detect_or_validate_prefers_explicit_mime() {
        assert_eq!(detect_or_validate(None, Some(PDF_MIME_TYPE)).unwrap(), PDF_MIME_TYPE);
    }

    #[test]
    fn detect_or_validate_requires_something() {
        assert!(detect_or_validate(None, None).is_err());
    }

    #[test]
    fn sniffs_pdf_from_bytes() {
        let mime = detect_mime_type_from_bytes(b"%PDF-1.4\n...").unwrap();
        assert_eq!(mime, PDF_MIME_TYPE);
    }

    #[test]
    fn sniffs_json_from_bytes() {
        let mime = detect_mime_type_from_bytes(br#"{"a": 1}"#).unwrap();
        assert_eq!(mime, JSON_MIME_TYPE);
    }

    #[test]
    fn get_extensions_for_mime_returns_known_extensions() {
        let extensions = get_extensions_for_mime(PDF_MIME_TYPE).unwrap();
        assert_eq!(extensions, vec!["pdf"]);
    }
}
