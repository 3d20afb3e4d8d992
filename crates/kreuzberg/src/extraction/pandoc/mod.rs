//! Pandoc-bridge extraction: one subprocess converter backing nine otherwise-unrelated
//! format families (Markdown variants, legacy/OpenDocument office files, ebooks,
//! structured text, LaTeX/Typst, bibliographies, XML-based formats, tabular data, and
//! a handful of misc formats Pandoc alone among this crate's dependencies can read).
//!
//! Every format goes through the same two (or three) `pandoc` invocations: a
//! `--to=markdown` pass for content, a `--to=json` pass for the AST that metadata and
//! citations are walked out of, and an optional `--extract-media` pass for embedded
//! images. Requires `pandoc` on `PATH`.

mod mime_types;
mod subprocess;
mod version;

use std::path::Path;

use tokio::fs;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::error::{KreuzbergError, Result};
use crate::types::{ExtractedImage, PandocExtractionResult};

pub use mime_types::{get_extension_from_mime, get_pandoc_format_from_mime};
pub use version::{MINIMUM_PANDOC_VERSION, validate_pandoc_version};

const IMAGE_EXTRACT_TIMEOUT_SECS: u64 = 120;
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// Convert a file already on disk in `from_format` to a [`PandocExtractionResult`].
///
/// `extract_images` additionally runs Pandoc's `--extract-media` pass; a failure there
/// is non-fatal and simply leaves `images` empty.
pub async fn convert_via_pandoc(path: &Path, from_format: &str, extract_images: bool) -> Result<PandocExtractionResult> {
    validate_pandoc_version().await?;

    let content = subprocess::extract_content(path, from_format).await?;
    let metadata = subprocess::extract_metadata(path, from_format).await?;

    let images = if extract_images {
        extract_media(path, from_format).await.unwrap_or_default()
    } else {
        Vec::new()
    };

    Ok(PandocExtractionResult { content, metadata, images })
}

/// Convert raw bytes by writing them to a temp file (named with `extension` so Pandoc's
/// own extension-sniffing heuristics see the right suffix) and delegating to
/// [`convert_via_pandoc`].
pub async fn convert_bytes_via_pandoc(
    bytes: &[u8],
    from_format: &str,
    extension: &str,
    extract_images: bool,
) -> Result<PandocExtractionResult> {
    validate_pandoc_version().await?;

    let temp_path = std::env::temp_dir().join(format!("kreuzberg_pandoc_in_{}.{extension}", uuid::Uuid::new_v4()));
    fs::write(&temp_path, bytes).await?;

    let result = convert_via_pandoc(&temp_path, from_format, extract_images).await;
    let _ = fs::remove_file(&temp_path).await;
    result
}

/// Run `pandoc --extract-media` into a scratch directory and collect every image file
/// found under it. Times out after [`IMAGE_EXTRACT_TIMEOUT_SECS`] and returns whatever
/// was written so far rather than failing the whole extraction.
async fn extract_media(path: &Path, from_format: &str) -> Result<Vec<ExtractedImage>> {
    let media_dir = std::env::temp_dir().join(format!("kreuzberg_pandoc_media_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&media_dir).await?;

    let mut child = Command::new("pandoc")
        .arg(path)
        .arg(format!("--from={from_format}"))
        .arg("--to=markdown")
        .arg("--extract-media")
        .arg(&media_dir)
        .arg("--output=/dev/null")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| KreuzbergError::parsing(format!("failed to execute pandoc for image extraction: {e}")))?;

    let status = match timeout(Duration::from_secs(IMAGE_EXTRACT_TIMEOUT_SECS), child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => return Err(KreuzbergError::parsing(format!("failed to wait for pandoc: {e}"))),
        Err(_) => {
            let _ = child.kill().await;
            let images = collect_images(&media_dir).await;
            let _ = fs::remove_dir_all(&media_dir).await;
            return Ok(images);
        }
    };

    let images = if status.success() { collect_images(&media_dir).await } else { Vec::new() };
    let _ = fs::remove_dir_all(&media_dir).await;
    Ok(images)
}

async fn collect_images(root: &Path) -> Vec<ExtractedImage> {
    let mut images = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(mut entries) = fs::read_dir(&dir).await else { continue };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            let Some(ext) = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase) else { continue };
            if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            let Ok(data) = fs::read(&path).await else { continue };
            let filename = path.file_name().and_then(|n| n.to_str()).map(str::to_string);

            let image_index = images.len();
            images.push(ExtractedImage {
                data: data.into(),
                format: ext.into(),
                image_index,
                page_number: None,
                width: None,
                height: None,
                colorspace: None,
                bits_per_component: None,
                is_mask: false,
                description: filename,
            });
        }
    }

    images
}
