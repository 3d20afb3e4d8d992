//! Turns a `text_splitter` run into [`Chunk`]s with byte offsets and page numbers attached.
//!
//! `text_splitter`'s chunk iterator yields plain `&str` slices with no positional metadata,
//! so offsets are reconstructed here by matching the configured overlap between consecutive
//! chunk strings rather than re-searching the original text.

use text_splitter::ChunkConfig;

use crate::error::{KreuzbergError, Result};
use crate::types::{Chunk, ChunkMetadata, PageBoundary};

/// Build a `text_splitter` chunk configuration, rejecting `overlap >= max_characters`
/// up front instead of letting `text_splitter` reject it with a less specific error.
pub(super) fn build_chunk_config(
    max_characters: usize,
    overlap: usize,
    trim: bool,
) -> Result<ChunkConfig<text_splitter::Characters>> {
    if overlap >= max_characters {
        return Err(KreuzbergError::validation(format!(
            "chunk overlap ({overlap}) must be less than max_characters ({max_characters})"
        )));
    }

    ChunkConfig::new(max_characters)
        .with_overlap(overlap)
        .map(|config| config.with_trim(trim))
        .map_err(|e| KreuzbergError::validation(format!("invalid chunk configuration: {e}")))
}

/// Reconstruct byte offsets for a sequence of chunk strings and attach page numbers.
pub(super) fn build_chunks<'a>(
    text_chunks: impl Iterator<Item = &'a str>,
    overlap: usize,
    page_boundaries: Option<&[PageBoundary]>,
) -> Result<Vec<Chunk>> {
    let text_chunks: Vec<&str> = text_chunks.collect();
    let total_chunks = text_chunks.len();
    let mut chunks = Vec::with_capacity(total_chunks);
    let mut cursor = 0usize;

    for (index, content) in text_chunks.iter().enumerate() {
        let byte_start = if index == 0 {
            0
        } else {
            let overlap_len = find_overlap_len(text_chunks[index - 1], content, overlap);
            cursor - overlap_len
        };
        let byte_end = byte_start + content.len();
        cursor = byte_end;

        let (first_page, last_page) = page_boundaries
            .map(|boundaries| super::boundaries::calculate_page_range(byte_start, byte_end, boundaries))
            .unwrap_or((None, None));

        chunks.push(Chunk {
            content: (*content).to_string(),
            metadata: ChunkMetadata {
                byte_start,
                byte_end,
                token_count: None,
                chunk_index: index,
                total_chunks,
                first_page,
                last_page,
            },
        });
    }

    Ok(chunks)
}

/// Longest byte-length suffix of `prev` that equals a prefix of `curr`, searched down from
/// `max_overlap` (with slack, since `text_splitter` may widen overlap slightly to land on a
/// word boundary) to 0. Only considers candidates that land on UTF-8 char boundaries in both
/// strings.
fn find_overlap_len(prev: &str, curr: &str, max_overlap: usize) -> usize {
    let search_limit = max_overlap.saturating_add(16).min(prev.len()).min(curr.len());

    for candidate in (0..=search_limit).rev() {
        if !prev.is_char_boundary(prev.len() - candidate) || !curr.is_char_boundary(candidate) {
            continue;
        }
        if prev[prev.len() - candidate..] == curr[..candidate] {
            return candidate;
        }
    }

    0
}
