//! Subprocess invocations against `pandoc` and the AST walk that turns its JSON output
//! into a [`PandocMetadata`].

use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tokio::process::Command;

use crate::error::{KreuzbergError, Result};
use crate::types::PandocMetadata;

fn classify_subprocess_failure(context: &str, stderr: &str) -> KreuzbergError {
    let lower = stderr.to_lowercase();
    if lower.contains("format") || lower.contains("unsupported") || lower.contains("error:") || lower.contains("failed") {
        KreuzbergError::parsing(format!("{context}: {stderr}"))
    } else {
        KreuzbergError::Io(std::io::Error::other(format!("{context}: {stderr}")))
    }
}

/// Convert `path` (already in `from_format`) to Markdown via `pandoc --to=markdown`.
pub async fn extract_content(path: &Path, from_format: &str) -> Result<String> {
    let output_path = std::env::temp_dir().join(format!("kreuzberg_pandoc_{}.md", uuid::Uuid::new_v4()));

    let output = Command::new("pandoc")
        .arg(path)
        .arg(format!("--from={from_format}"))
        .arg("--to=markdown")
        .arg("--wrap=preserve")
        .arg("--quiet")
        .arg("--output")
        .arg(&output_path)
        .output()
        .await
        .map_err(|e| std::io::Error::other(format!("failed to execute pandoc: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let _ = fs::remove_file(&output_path).await;
        return Err(classify_subprocess_failure("pandoc content conversion failed", &stderr));
    }

    let content = fs::read_to_string(&output_path)
        .await
        .map_err(|e| KreuzbergError::parsing(format!("failed to read pandoc markdown output: {e}")))?;
    let _ = fs::remove_file(&output_path).await;

    Ok(content)
}

/// Extract content and metadata in one pass: a `--to=json` conversion gives us both the
/// full document AST (for metadata and citations) and the content, and a second
/// `--to=markdown` call is made only to produce the user-facing text.
pub async fn extract_metadata(path: &Path, from_format: &str) -> Result<PandocMetadata> {
    let json_path = std::env::temp_dir().join(format!("kreuzberg_pandoc_{}.json", uuid::Uuid::new_v4()));

    let output = Command::new("pandoc")
        .arg(path)
        .arg(format!("--from={from_format}"))
        .arg("--to=json")
        .arg("--quiet")
        .arg("--output")
        .arg(&json_path)
        .output()
        .await
        .map_err(|e| std::io::Error::other(format!("failed to execute pandoc: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let _ = fs::remove_file(&json_path).await;
        return Err(classify_subprocess_failure("pandoc metadata extraction failed", &stderr));
    }

    let json_text = fs::read_to_string(&json_path)
        .await
        .map_err(|e| KreuzbergError::parsing(format!("failed to read pandoc JSON output: {e}")))?;
    let _ = fs::remove_file(&json_path).await;

    let ast: Value = serde_json::from_str(&json_text)?;
    Ok(metadata_from_ast(&ast))
}

/// Walk a Pandoc JSON AST into a [`PandocMetadata`].
///
/// Citations discovered in the document body are appended to any `citations` already
/// present in the meta-map rather than deduplicated against it: a reference cited twice
/// in the body is meant to show up twice in the citation list.
fn metadata_from_ast(ast: &Value) -> PandocMetadata {
    let mut metadata = PandocMetadata::default();

    if let Some(meta) = ast.get("meta").and_then(Value::as_object) {
        for (key, node) in meta {
            let Some(value) = extract_meta_value(node) else { continue };
            apply_meta_field(&mut metadata, &pandoc_key(key), value);
        }
    }

    if let Some(blocks) = ast.get("blocks").and_then(Value::as_array) {
        let mut citations = Vec::new();
        collect_citations(blocks, &mut citations);
        metadata.citations.extend(citations);
    }

    metadata
}

/// Map a Pandoc metadata key to this crate's canonical field name.
fn pandoc_key(key: &str) -> String {
    match key {
        "abstract" => "summary".to_string(),
        "date" => "created_at".to_string(),
        "contributors" | "author" => "authors".to_string(),
        "institute" => "organization".to_string(),
        "lang" | "language" => "languages".to_string(),
        other => other.to_string(),
    }
}

fn apply_meta_field(metadata: &mut PandocMetadata, key: &str, value: Value) {
    match key {
        "summary" => metadata.summary = value.as_str().map(str::to_string).or(metadata.summary.take()),
        "created_at" => metadata.created_at = value.as_str().map(str::to_string).or(metadata.created_at.take()),
        "organization" => metadata.organization = value.as_str().map(str::to_string).or(metadata.organization.take()),
        "authors" => metadata.authors.extend(value_to_strings(&value)),
        "languages" => metadata.languages.extend(value_to_strings(&value)),
        "citations" => metadata.citations.extend(value_to_strings(&value)),
        _ => {}
    }
}

fn value_to_strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Extract a value from one Pandoc `MetaValue` AST node.
fn extract_meta_value(node: &Value) -> Option<Value> {
    let obj = node.as_object()?;
    let node_type = obj.get("t")?.as_str()?;
    let content = obj.get("c");

    match node_type {
        "MetaString" => content.and_then(Value::as_str).map(|s| Value::String(s.to_string())),
        "MetaInlines" => content.and_then(Value::as_array).and_then(|i| extract_inlines(i)),
        "MetaList" => {
            let list = content.and_then(Value::as_array)?;
            let mut values = Vec::new();
            for item in list {
                if let Some(value) = extract_meta_value(item) {
                    match value {
                        Value::Array(items) => values.extend(items),
                        other => values.push(other),
                    }
                }
            }
            (!values.is_empty()).then_some(Value::Array(values))
        }
        "MetaBlocks" => {
            let blocks = content.and_then(Value::as_array)?;
            let mut paragraphs = Vec::new();
            for block in blocks {
                let Some(block_obj) = block.as_object() else { continue };
                if block_obj.get("t").and_then(Value::as_str) == Some("Para")
                    && let Some(inlines) = block_obj.get("c").and_then(Value::as_array)
                    && let Some(Value::String(text)) = extract_inlines(inlines)
                {
                    paragraphs.push(text);
                }
            }
            (!paragraphs.is_empty()).then(|| Value::String(paragraphs.join(" ")))
        }
        "MetaMap" => {
            let map = content.and_then(Value::as_object)?;
            let mut result = serde_json::Map::new();
            for (key, value) in map {
                if let Some(extracted) = extract_meta_value(value) {
                    result.insert(key.clone(), extracted);
                }
            }
            (!result.is_empty()).then_some(Value::Object(result))
        }
        _ => None,
    }
}

fn extract_inlines(inlines: &[Value]) -> Option<Value> {
    let text: String = inlines.iter().filter_map(extract_inline_text).collect();
    (!text.is_empty()).then_some(Value::String(text))
}

fn extract_inline_text(node: &Value) -> Option<String> {
    let obj = node.as_object()?;
    let node_type = obj.get("t")?.as_str()?;
    let content = obj.get("c");

    match node_type {
        "Str" => content.and_then(Value::as_str).map(str::to_string),
        "Space" | "SoftBreak" => Some(" ".to_string()),
        "LineBreak" => Some("\n".to_string()),
        "Emph" | "Strong" | "Strikeout" | "Superscript" | "Subscript" | "SmallCaps" => content
            .and_then(Value::as_array)
            .and_then(extract_inlines)
            .and_then(|v| v.as_str().map(str::to_string)),
        "Code" | "Math" => {
            let arr = content.and_then(Value::as_array)?;
            if arr.len() != 2 {
                return None;
            }
            arr[1].as_str().map(str::to_string)
        }
        "Link" | "Image" | "Quoted" | "Cite" => {
            let arr = content.and_then(Value::as_array)?;
            let inlines = arr.last()?.as_array()?;
            extract_inlines(inlines).and_then(|v| v.as_str().map(str::to_string))
        }
        _ => None,
    }
}

/// Walk the block tree collecting `citationId`s from every `Cite` node, recursing into
/// nested block/inline arrays. Order matches document order; duplicates are kept.
fn collect_citations(blocks: &[Value], citations: &mut Vec<String>) {
    for block in blocks {
        let Some(obj) = block.as_object() else { continue };

        if obj.get("t").and_then(Value::as_str) == Some("Cite")
            && let Some(arr) = obj.get("c").and_then(Value::as_array)
            && let Some(cite_list) = arr.first().and_then(Value::as_array)
        {
            for cite in cite_list {
                if let Some(id) = cite.get("citationId").and_then(Value::as_str) {
                    citations.push(id.to_string());
                }
            }
        }

        if let Some(content) = obj.get("c") {
            if let Some(nested) = content.as_array() {
                collect_citations(nested, citations);
            } else if let Some(nested_obj) = content.as_object() {
                for value in nested_obj.values() {
                    if let Some(arr) = value.as_array() {
                        collect_citations(arr, citations);
                    }
                }
            }
        }
    }
}
