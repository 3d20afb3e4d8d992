//! Word-position extraction from a PDF page's native text layer.
//!
//! Feeds the same geometric table reconstruction used by OCR backends (see
//! [`crate::ocr::table`]) so tables can be detected from real glyph positions
//! instead of requiring a render-and-OCR round trip.

use super::error::{PdfError, Result};
use crate::ocr::types::HocrWord;
use pdfium_render::prelude::*;

struct PendingWord {
    text: String,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

fn flush_word(current: &mut Option<PendingWord>, words: &mut Vec<HocrWord>) {
    let Some(word) = current.take() else {
        return;
    };
    words.push(HocrWord {
        text: word.text,
        left: word.left.max(0.0).round() as u32,
        top: word.top.max(0.0).round() as u32,
        width: (word.right - word.left).max(0.0).round() as u32,
        height: (word.bottom - word.top).max(0.0).round() as u32,
        confidence: 100.0,
    });
}

/// Extract word-level bounding boxes from a PDF page's native text.
///
/// Groups consecutive non-whitespace characters into words and converts
/// pdfium's bottom-left-origin coordinates into the top-left-origin,
/// pixel-like coordinates [`crate::ocr::table::reconstruct_table`] expects.
/// `min_confidence` is kept for API parity with OCR-backed callers; native
/// extraction has no recognition uncertainty, so it has no effect here.
pub(crate) fn extract_words_from_page(page: &PdfPage, min_confidence: f64) -> Result<Vec<HocrWord>> {
    let _ = min_confidence;
    let page_height = page.height().value;

    let page_text = page
        .text()
        .map_err(|e| PdfError::TextExtractionFailed(format!("Failed to get page text: {}", e)))?;

    let chars = page_text.chars();
    let char_count = chars.len();

    let mut words = Vec::new();
    let mut current: Option<PendingWord> = None;

    for i in 0..char_count {
        let Ok(pdf_char) = chars.get(i) else { continue };
        let Some(ch) = pdf_char.unicode_char() else { continue };

        if ch.is_whitespace() {
            flush_word(&mut current, &mut words);
            continue;
        }

        let Ok(bounds) = pdf_char.loose_bounds() else { continue };
        let left = bounds.left().value;
        let right = bounds.right().value;
        let top = page_height - bounds.top().value;
        let bottom = page_height - bounds.bottom().value;

        match &mut current {
            Some(word) => {
                word.text.push(ch);
                word.left = word.left.min(left);
                word.top = word.top.min(top);
                word.right = word.right.max(right);
                word.bottom = word.bottom.max(bottom);
            }
            None => {
                current = Some(PendingWord {
                    text: ch.to_string(),
                    left,
                    top,
                    right,
                    bottom,
                });
            }
        }
    }
    flush_word(&mut current, &mut words);

    Ok(words)
}
