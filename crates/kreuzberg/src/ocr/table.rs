//! Geometric table reconstruction from a flat list of positioned words.
//!
//! Shared by the Tesseract OCR backend (words come from TSV output) and the native PDF
//! extractor (words come from glyph positions, see `pdf::table`) — table detection only
//! needs bounding boxes, not where they came from.

use super::types::HocrWord;

/// Parse Tesseract's `-c tsv` output into positioned words, skipping non-word rows
/// (Tesseract TSV emits one row per page/block/paragraph/line/word; level 5 is word).
pub fn extract_words_from_tsv(tsv: &str) -> Vec<HocrWord> {
    let mut words = Vec::new();
    let mut lines = tsv.lines();
    let Some(header) = lines.next() else {
        return words;
    };
    let columns: Vec<&str> = header.split('\t').collect();
    let idx = |name: &str| columns.iter().position(|c| *c == name);
    let (Some(level_i), Some(left_i), Some(top_i), Some(width_i), Some(height_i), Some(conf_i), Some(text_i)) = (
        idx("level"),
        idx("left"),
        idx("top"),
        idx("width"),
        idx("height"),
        idx("conf"),
        idx("text"),
    ) else {
        return words;
    };

    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() <= text_i {
            continue;
        }
        if fields[level_i].trim() != "5" {
            continue;
        }
        let text = fields[text_i].trim();
        if text.is_empty() {
            continue;
        }
        let conf: f64 = fields[conf_i].trim().parse().unwrap_or(-1.0);
        if conf < 0.0 {
            continue;
        }
        let (Ok(left), Ok(top), Ok(width), Ok(height)) = (
            fields[left_i].trim().parse(),
            fields[top_i].trim().parse(),
            fields[width_i].trim().parse(),
            fields[height_i].trim().parse(),
        ) else {
            continue;
        };
        words.push(HocrWord { text: text.to_string(), left, top, width, height, confidence: conf });
    }

    words
}

/// Cluster words into rows (by vertical overlap) and columns (by horizontal gaps), producing
/// a `rows x columns` grid of cell text. Returns an empty grid when fewer than two rows or
/// columns are detected, since a single row/column isn't meaningfully a "table".
pub fn reconstruct_table(words: &[HocrWord], column_threshold: i32, row_threshold_ratio: f64) -> Vec<Vec<String>> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&HocrWord> = words.iter().collect();
    sorted.sort_by_key(|w| (w.top, w.left));

    let mut rows: Vec<Vec<&HocrWord>> = Vec::new();
    for word in sorted {
        let word_mid = word.top as f64 + word.height as f64 / 2.0;
        let matched = rows.iter_mut().find(|row| {
            let anchor = row[0];
            let anchor_mid = anchor.top as f64 + anchor.height as f64 / 2.0;
            (word_mid - anchor_mid).abs() <= anchor.height as f64 * row_threshold_ratio
        });
        match matched {
            Some(row) => row.push(word),
            None => rows.push(vec![word]),
        }
    }

    if rows.len() < 2 {
        return Vec::new();
    }

    let mut column_starts: Vec<i32> = Vec::new();
    for row in &rows {
        let mut sorted_row = row.clone();
        sorted_row.sort_by_key(|w| w.left);
        for word in sorted_row {
            let left = word.left as i32;
            if !column_starts.iter().any(|c| (c - left).abs() <= column_threshold) {
                column_starts.push(left);
            }
        }
    }
    column_starts.sort_unstable();

    if column_starts.len() < 2 {
        return Vec::new();
    }

    let mut grid = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = vec![String::new(); column_starts.len()];
        for word in row {
            let left = word.left as i32;
            let col = column_starts
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| (*c - left).abs())
                .map(|(i, _)| i)
                .unwrap_or(0);
            if cells[col].is_empty() {
                cells[col] = word.text.clone();
            } else {
                cells[col].push(' ');
                cells[col].push_str(&word.text);
            }
        }
        grid.push(cells);
    }

    grid
}

/// Render a reconstructed cell grid as a GitHub-flavored Markdown table.
pub fn table_to_markdown(cells: &[Vec<String>]) -> String {
    let Some(first_row) = cells.first() else {
        return String::new();
    };
    let col_count = first_row.len();
    let mut out = String::new();

    for (i, row) in cells.iter().enumerate() {
        out.push('|');
        for cell in row {
            out.push(' ');
            out.push_str(&cell.replace('|', "\\|"));
            out.push_str(" |");
        }
        out.push('\n');
        if i == 0 {
            out.push('|');
            for _ in 0..col_count {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }

    out
}
