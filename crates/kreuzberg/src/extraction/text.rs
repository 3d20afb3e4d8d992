//! Plain text and Markdown parsing.
//!
//! Streaming, line-by-line parsers so multi-gigabyte files don't need to be
//! held in memory twice. Markdown parsing additionally pulls out headers,
//! links, and fenced code blocks for [`crate::types::TextMetadata`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Result;
use crate::types::TextExtractionResult;

static MARKDOWN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s*(.+)$").expect("markdown header regex is valid"));
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("markdown link regex is valid"));
static CODE_BLOCK_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(\w*)[\r]?$").expect("code block delimiter regex is valid"));

/// Parse plain text or Markdown bytes into content plus line/word/character counts,
/// and (when `is_markdown`) headers, links, and fenced code blocks.
pub fn parse_text(text_bytes: &[u8], is_markdown: bool) -> Result<TextExtractionResult> {
    let text = String::from_utf8_lossy(text_bytes).into_owned();

    let mut line_count = 0;
    let mut word_count = 0;
    let character_count = text.len();

    let mut headers = Vec::new();
    let mut links = Vec::new();
    let mut code_blocks = Vec::new();
    let mut in_code_block = false;
    let mut current_code_lang = String::new();
    let mut current_code = String::new();

    for line in text.lines() {
        line_count += 1;
        word_count += line.split_whitespace().count();

        if !is_markdown {
            continue;
        }

        if CODE_BLOCK_DELIMITER.is_match(line) {
            if in_code_block {
                code_blocks.push((
                    if current_code_lang.is_empty() {
                        "plain".to_string()
                    } else {
                        current_code_lang.clone()
                    },
                    current_code.trim_end().to_string(),
                ));
                current_code.clear();
                current_code_lang.clear();
                in_code_block = false;
            } else {
                if let Some(caps) = CODE_BLOCK_DELIMITER.captures(line) {
                    current_code_lang = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
                }
                in_code_block = true;
            }
            continue;
        }

        if in_code_block {
            current_code.push_str(line);
            current_code.push('\n');
            continue;
        }

        if let Some(caps) = MARKDOWN_HEADER.captures(line)
            && let Some(header) = caps.get(1)
        {
            headers.push(header.as_str().to_string());
        }

        for caps in MARKDOWN_LINK.captures_iter(line) {
            if let (Some(text), Some(url)) = (caps.get(1), caps.get(2)) {
                links.push((text.as_str().to_string(), url.as_str().to_string()));
            }
        }
    }

    Ok(TextExtractionResult {
        content: text,
        line_count,
        word_count,
        character_count,
        headers: if headers.is_empty() { None } else { Some(headers) },
        links: if links.is_empty() { None } else { Some(links) },
        code_blocks: if code_blocks.is_empty() {
            None
        } else {
            Some(code_blocks)
        },
    })
}
