//! MIME type <-> Pandoc `--from`/`--to` format name mapping.
//!
//! Pandoc bridges nine format families into one converter (Markdown variants, legacy
//! Office documents, ebooks, structured text, LaTeX, bibliographies, XML-based formats,
//! tabular data, and a handful of miscellaneous formats). Every MIME type this crate
//! routes through Pandoc must resolve to both a Pandoc format name and a file extension
//! (Pandoc infers some behavior from the extension of the temp file it's given).

use crate::error::{KreuzbergError, Result};
use std::collections::HashMap;

/// Resolve a MIME type to the Pandoc `--from=<format>` value.
pub fn get_pandoc_format_from_mime(mime_type: &str) -> Result<String> {
    let mappings = mime_to_pandoc_format();

    if let Some(format) = mappings.get(mime_type) {
        return Ok(format.to_string());
    }

    if mime_type == "text/markdown" || mime_type == "text/x-markdown" {
        return Ok("markdown".to_string());
    }

    for (key, value) in &mappings {
        if mime_type.starts_with(key) {
            return Ok(value.to_string());
        }
    }

    Err(KreuzbergError::UnsupportedFormat(format!(
        "no Pandoc format mapping for MIME type: {}",
        mime_type
    )))
}

/// Resolve a MIME type to the file extension Pandoc should see on its temp input file.
pub fn get_extension_from_mime(mime_type: &str) -> Result<String> {
    mime_to_extension()
        .get(mime_type)
        .map(|s| s.to_string())
        .ok_or_else(|| KreuzbergError::UnsupportedFormat(format!("no file extension mapping for MIME type: {}", mime_type)))
}

fn mime_to_pandoc_format() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Markdown family
        ("text/markdown", "markdown"),
        ("text/x-markdown", "markdown"),
        ("text/x-gfm", "gfm"),
        ("text/x-commonmark", "commonmark"),
        ("text/x-markdown-extra", "markdown_phpextra"),
        ("text/x-multimarkdown", "markdown_mmd"),
        // Legacy/modern office documents
        ("application/vnd.openxmlformats-officedocument.wordprocessingml.document", "docx"),
        ("application/vnd.oasis.opendocument.text", "odt"),
        ("application/rtf", "rtf"),
        // Ebooks
        ("application/epub+zip", "epub"),
        ("application/x-fictionbook+xml", "fb2"),
        // Structured/lightweight markup text
        ("text/x-rst", "rst"),
        ("text/x-org", "org"),
        ("text/x-dokuwiki", "dokuwiki"),
        ("text/x-mdoc", "mdoc"),
        ("text/x-pod", "pod"),
        ("text/troff", "man"),
        ("application/x-ipynb+json", "ipynb"),
        // LaTeX/Typst
        ("application/x-latex", "latex"),
        ("application/x-typst", "typst"),
        // Bibliographies
        ("application/x-bibtex", "bibtex"),
        ("application/x-biblatex", "biblatex"),
        ("application/x-research-info-systems", "ris"),
        ("application/x-endnote+xml", "endnotexml"),
        // XML-based formats
        ("application/docbook+xml", "docbook"),
        ("application/x-jats+xml", "jats"),
        ("application/x-opml+xml", "opml"),
        ("application/csl+json", "csljson"),
        // Tabular data
        ("text/csv", "csv"),
        ("text/tab-separated-values", "tsv"),
    ])
}

fn mime_to_extension() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("text/markdown", "md"),
        ("text/x-markdown", "md"),
        ("text/x-gfm", "md"),
        ("text/x-commonmark", "md"),
        ("text/x-markdown-extra", "md"),
        ("text/x-multimarkdown", "md"),
        ("application/vnd.openxmlformats-officedocument.wordprocessingml.document", "docx"),
        ("application/vnd.oasis.opendocument.text", "odt"),
        ("application/rtf", "rtf"),
        ("application/epub+zip", "epub"),
        ("application/x-fictionbook+xml", "fb2"),
        ("text/x-rst", "rst"),
        ("text/x-org", "org"),
        ("text/x-dokuwiki", "wiki"),
        ("text/x-mdoc", "md"),
        ("text/x-pod", "pod"),
        ("text/troff", "1"),
        ("application/x-ipynb+json", "ipynb"),
        ("application/x-latex", "tex"),
        ("application/x-typst", "typst"),
        ("application/x-bibtex", "bib"),
        ("application/x-biblatex", "bib"),
        ("application/x-research-info-systems", "ris"),
        ("application/x-endnote+xml", "xml"),
        ("application/docbook+xml", "xml"),
        ("application/x-jats+xml", "xml"),
        ("application/x-opml+xml", "opml"),
        ("application/csl+json", "json"),
        ("text/csv", "csv"),
        ("text/tab-separated-values", "tsv"),
    ])
}
