//! UTF-8 boundary validation for page boundaries supplied alongside chunking input.
//!
//! `text_splitter` only ever returns valid `&str` slices, but the `PageBoundary` byte
//! offsets it's paired with come from a separate extraction pass (PDF page breaks, etc.)
//! and must be checked before anything indexes `text` with them.

use std::collections::HashSet;

use crate::error::{KreuzbergError, Result};
use crate::types::PageBoundary;

/// Above this many boundaries, only a strided sample is checked rather than every one,
/// so a document with tens of thousands of pages doesn't pay an O(n) scan on each chunk call.
pub const ADAPTIVE_VALIDATION_THRESHOLD: usize = 256;

/// Validate that every (or, above the threshold, a sampled subset of) page boundary falls on
/// a UTF-8 char boundary of `text`.
pub fn validate_utf8_boundaries(text: &str, boundaries: &[PageBoundary]) -> Result<()> {
    if boundaries.is_empty() {
        return Ok(());
    }

    let check = |boundary: &PageBoundary| -> Result<()> {
        if boundary.byte_start > text.len() || boundary.byte_end > text.len() {
            return Err(KreuzbergError::validation(format!(
                "page {} boundary [{}, {}) is out of range for a {}-byte text",
                boundary.page_number,
                boundary.byte_start,
                boundary.byte_end,
                text.len()
            )));
        }
        if !text.is_char_boundary(boundary.byte_start) || !text.is_char_boundary(boundary.byte_end) {
            return Err(KreuzbergError::validation(format!(
                "page {} boundary [{}, {}) does not fall on a UTF-8 character boundary",
                boundary.page_number, boundary.byte_start, boundary.byte_end
            )));
        }
        Ok(())
    };

    if boundaries.len() <= ADAPTIVE_VALIDATION_THRESHOLD {
        for boundary in boundaries {
            check(boundary)?;
        }
    } else {
        let stride = boundaries.len() / ADAPTIVE_VALIDATION_THRESHOLD;
        for boundary in boundaries.iter().step_by(stride.max(1)) {
            check(boundary)?;
        }
    }

    Ok(())
}

/// Precompute the set of valid char-boundary byte offsets in `text`, for callers that need
/// to check many candidate offsets in O(1) each rather than re-walking the string per check.
pub fn precompute_utf8_boundaries(text: &str) -> HashSet<usize> {
    let mut boundaries: HashSet<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.insert(text.len());
    boundaries
}
