//! Legacy Office format conversion via a headless LibreOffice (`soffice`) subprocess.
//!
//! `.doc` and `.ppt` files have no pure-Rust parser in this crate; both are converted
//! to their OOXML successors (`.docx`, `.pptx`) first and then handed to the regular
//! extractor for that format. Requires `soffice` on `PATH`.

use std::borrow::Cow;
use std::path::Path;

use tokio::fs;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::core::mime::{DOCX_MIME_TYPE, POWER_POINT_MIME_TYPE};
use crate::error::{KreuzbergError, Result};
use crate::types::LibreOfficeConversionResult;

/// Default timeout for a single LibreOffice conversion, in seconds.
pub const DEFAULT_CONVERSION_TIMEOUT: u64 = 300;

/// Checks that `soffice` is on `PATH` and responds to `--version`.
pub async fn check_libreoffice_available() -> Result<()> {
    let result = Command::new("soffice").arg("--version").output().await;

    match result {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(KreuzbergError::missing_dependency(
            "libreoffice",
            "soffice is installed but exited non-zero on --version; reinstall LibreOffice",
        )),
        Err(_) => Err(KreuzbergError::missing_dependency(
            "libreoffice",
            "legacy .doc/.ppt support requires LibreOffice's soffice binary on PATH \
             (apt install libreoffice, brew install --cask libreoffice, or winget install LibreOffice.LibreOffice)",
        )),
    }
}

async fn convert_office_doc(
    input_path: &Path,
    output_dir: &Path,
    target_format: &str,
    timeout_seconds: u64,
) -> Result<Vec<u8>> {
    check_libreoffice_available().await?;

    fs::create_dir_all(output_dir).await?;

    let command = Command::new("soffice")
        .arg("--headless")
        .arg("--convert-to")
        .arg(target_format)
        .arg("--outdir")
        .arg(output_dir)
        .arg(input_path)
        .output();

    let output = match timeout(Duration::from_secs(timeout_seconds), command).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(KreuzbergError::parsing(format!("Failed to execute LibreOffice: {}", e))),
        Err(_) => {
            return Err(KreuzbergError::parsing(format!(
                "LibreOffice conversion timed out after {} seconds",
                timeout_seconds
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        let stderr_lower = stderr.to_lowercase();
        let stdout_lower = stdout.to_lowercase();
        let keywords = ["format", "unsupported", "error:", "failed"];

        if keywords.iter().any(|k| stderr_lower.contains(k) || stdout_lower.contains(k)) {
            return Err(KreuzbergError::parsing(format!(
                "LibreOffice conversion failed: {}",
                if !stderr.is_empty() { &stderr } else { &stdout }
            )));
        }

        return Err(KreuzbergError::Io(std::io::Error::other(format!(
            "LibreOffice process failed with return code {}: {}",
            output.status.code().unwrap_or(-1),
            if !stderr.is_empty() { stderr } else { stdout }
        ))));
    }

    let input_stem = input_path
        .file_stem()
        .ok_or_else(|| KreuzbergError::parsing("Invalid input file name".to_string()))?;

    let expected_output = output_dir.join(format!("{}.{}", input_stem.to_string_lossy(), target_format));

    let converted_bytes = fs::read(&expected_output).await.map_err(|e| {
        KreuzbergError::parsing(format!(
            "LibreOffice conversion completed but output file not found: {}",
            e
        ))
    })?;

    if converted_bytes.is_empty() {
        return Err(KreuzbergError::parsing("LibreOffice conversion produced an empty file".to_string()));
    }

    Ok(converted_bytes)
}

async fn convert_via_temp_dir(
    bytes: &[u8],
    input_extension: &str,
    target_format: &str,
    target_mime: &'static str,
) -> Result<LibreOfficeConversionResult> {
    let temp_dir = std::env::temp_dir();
    let unique_id = uuid::Uuid::new_v4();
    let input_dir = temp_dir.join(format!("kreuzberg_{}_{}", input_extension, unique_id));
    let output_dir = temp_dir.join(format!("kreuzberg_{}_{}_out", input_extension, unique_id));

    fs::create_dir_all(&input_dir).await?;
    let input_path = input_dir.join(format!("input.{}", input_extension));
    fs::write(&input_path, bytes).await?;

    let result = convert_office_doc(&input_path, &output_dir, target_format, DEFAULT_CONVERSION_TIMEOUT).await;

    let _ = fs::remove_dir_all(&input_dir).await;
    let _ = fs::remove_dir_all(&output_dir).await;

    Ok(LibreOfficeConversionResult {
        converted_bytes: result?,
        original_format: Cow::Borrowed(input_extension),
        target_format: Cow::Borrowed(target_format),
        target_mime: Cow::Borrowed(target_mime),
    })
}

/// Converts a legacy `.doc` binary to `.docx` via a LibreOffice headless round trip.
pub async fn convert_doc_to_docx(doc_bytes: &[u8]) -> Result<LibreOfficeConversionResult> {
    convert_via_temp_dir(doc_bytes, "doc", "docx", DOCX_MIME_TYPE).await
}

/// Converts a legacy `.ppt` binary to `.pptx` via a LibreOffice headless round trip.
pub async fn convert_ppt_to_pptx(ppt_bytes: &[u8]) -> Result<LibreOfficeConversionResult> {
    convert_via_temp_dir(ppt_bytes, "ppt", "pptx", POWER_POINT_MIME_TYPE).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn check_libreoffice_available_does_not_panic() {
        let _ = check_libreoffice_available().await;
    }

    #[test]
    fn default_conversion_timeout_value() {
        assert_eq!(DEFAULT_CONVERSION_TIMEOUT, 300);
    }

    #[tokio::test]
    async fn convert_doc_to_docx_rejects_bogus_input() {
        if check_libreoffice_available().await.is_err() {
            return;
        }
        let result = convert_doc_to_docx(b"not a real .doc file").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn convert_ppt_to_pptx_rejects_bogus_input() {
        if check_libreoffice_available().await.is_err() {
            return;
        }
        let result = convert_ppt_to_pptx(b"not a real .ppt file").await;
        assert!(result.is_err());
    }

    #[test]
    fn conversion_result_carries_target_mime() {
        let result = LibreOfficeConversionResult {
            converted_bytes: vec![1, 2, 3],
            original_format: Cow::Borrowed("ppt"),
            target_format: Cow::Borrowed("pptx"),
            target_mime: Cow::Borrowed(POWER_POINT_MIME_TYPE),
        };
        assert_eq!(result.target_mime, POWER_POINT_MIME_TYPE);
    }
}
