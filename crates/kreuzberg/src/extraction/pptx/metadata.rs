//! Presentation metadata and speaker notes extraction.

use std::collections::HashMap;
use std::io::{Read, Seek};

use roxmltree::Document;
use zip::ZipArchive;

use super::container::PptxContainer;
use crate::error::{KreuzbergError, Result};
use crate::types::PptxMetadata;

const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

fn read_archive_file<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Option<Vec<u8>> {
    let mut file = archive.by_name(path).ok()?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).ok()?;
    Some(contents)
}

fn app_slide_titles(app_xml: &[u8]) -> Vec<String> {
    let Ok(xml_str) = std::str::from_utf8(app_xml) else {
        return Vec::new();
    };
    let Ok(doc) = Document::parse(xml_str) else {
        return Vec::new();
    };

    doc.descendants()
        .find(|n| n.has_tag_name("TitlesOfParts"))
        .into_iter()
        .flat_map(|titles| titles.descendants())
        .filter(|n| n.has_tag_name("lpstr"))
        .filter_map(|n| n.text().map(str::to_string))
        .filter(|s| !s.is_empty())
        .collect()
}

fn count_slide_parts<R: Read + Seek>(archive: &mut ZipArchive<R>) -> usize {
    (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok())
        .filter(|f| f.name().starts_with("ppt/slides/slide") && f.name().ends_with(".xml"))
        .count()
}

/// Reads `docProps/app.xml` for slide titles and derives slide count from the
/// archive's slide parts directly, since `app.xml`'s `<Slides>` count is not
/// always present or accurate.
pub(super) fn extract_metadata<R: Read + Seek>(archive: &mut ZipArchive<R>) -> PptxMetadata {
    let slide_names = read_archive_file(archive, "docProps/app.xml")
        .map(|xml| app_slide_titles(&xml))
        .unwrap_or_default();

    PptxMetadata {
        slide_count: count_slide_parts(archive),
        slide_names,
    }
}

fn extract_notes_text(notes_xml: &[u8]) -> Result<String> {
    let xml_str = std::str::from_utf8(notes_xml)
        .map_err(|e| KreuzbergError::parsing(format!("Invalid UTF-8 in notes XML: {}", e)))?;

    let doc =
        Document::parse(xml_str).map_err(|e| KreuzbergError::parsing(format!("Failed to parse notes XML: {}", e)))?;

    let text_parts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name((A_NS, "t")))
        .filter_map(|n| n.text())
        .collect();

    Ok(text_parts.join(" "))
}

/// Reads every `ppt/notesSlides/notesSlideN.xml` part that has a matching
/// slide, keyed by 1-indexed slide number.
pub(super) fn extract_all_notes<R: Read + Seek>(container: &mut PptxContainer<R>) -> Result<HashMap<u32, String>> {
    let mut notes = HashMap::new();

    for (i, slide_path) in container.slide_paths().to_vec().iter().enumerate() {
        let notes_path = slide_path.replace("slides/slide", "notesSlides/notesSlide");
        if let Some(notes_xml) = container.read_file(&notes_path).ok()
            && let Ok(note_text) = extract_notes_text(&notes_xml)
            && !note_text.trim().is_empty()
        {
            notes.insert((i + 1) as u32, note_text);
        }
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_notes_text() {
        let notes_xml = br#"<?xml version="1.0"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
         xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:sp>
                <p:txBody>
                    <a:p><a:r><a:t>First note</a:t></a:r></a:p>
                    <a:p><a:r><a:t>Second note</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>
        </p:spTree>
    </p:cSld>
</p:notes>"#;

        let notes = extract_notes_text(notes_xml).unwrap();
        assert!(notes.contains("First note"));
        assert!(notes.contains("Second note"));
    }

    #[test]
    fn test_app_slide_titles_empty_on_malformed() {
        assert!(app_slide_titles(b"not xml").is_empty());
    }
}
