//! Small shared data carriers used across the OCR subprocess pipeline.

use super::error::OcrError;

/// A single recognized word with its axis-aligned bounding box, as parsed from Tesseract's
/// TSV output (`tesseract ... tsv`) or from PDF glyph positions (see `pdf::table`).
#[derive(Debug, Clone)]
pub struct HocrWord {
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    /// Recognition confidence in the 0-100 range.
    pub confidence: f64,
}

/// Wraps a single batch submission's outcome together with its original index, so a
/// concurrent pool can reorder results back to submission order once every task completes.
#[derive(Debug)]
pub struct BatchItemResult<T> {
    pub index: usize,
    pub result: Result<T, OcrError>,
}
