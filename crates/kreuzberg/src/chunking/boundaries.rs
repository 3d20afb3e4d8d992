//! Map a chunk's byte range onto the page(s) it falls within.

use crate::error::{KreuzbergError, Result};
use crate::types::PageBoundary;

/// Find the first and last page overlapping `[chunk_start, chunk_end)`.
///
/// Returns `(None, None)` when no boundary overlaps the chunk range (including when
/// `boundaries` is empty).
pub fn calculate_page_range(
    chunk_start: usize,
    chunk_end: usize,
    boundaries: &[PageBoundary],
) -> (Option<usize>, Option<usize>) {
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;

    for boundary in boundaries {
        let overlaps = boundary.byte_start < chunk_end && chunk_start < boundary.byte_end;
        if !overlaps {
            continue;
        }
        first = Some(first.map_or(boundary.page_number, |p: usize| p.min(boundary.page_number)));
        last = Some(last.map_or(boundary.page_number, |p: usize| p.max(boundary.page_number)));
    }

    (first, last)
}

/// Validate that page boundaries are sorted by `byte_start` and non-overlapping.
///
/// Chunking doesn't require this itself (`calculate_page_range` works fine with
/// unordered input) but callers building boundaries from scratch want the guarantee.
pub fn validate_page_boundaries(boundaries: &[PageBoundary]) -> Result<()> {
    for window in boundaries.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if a.byte_start > a.byte_end {
            return Err(KreuzbergError::validation(format!(
                "page {} has byte_start ({}) after byte_end ({})",
                a.page_number, a.byte_start, a.byte_end
            )));
        }
        if b.byte_start < a.byte_end {
            return Err(KreuzbergError::validation(format!(
                "page {} [{}, {}) overlaps page {} [{}, {})",
                a.page_number, a.byte_start, a.byte_end, b.page_number, b.byte_start, b.byte_end
            )));
        }
    }
    Ok(())
}
