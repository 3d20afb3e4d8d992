//! Subprocess-based Tesseract OCR backend.
//!
//! Shells out to the `tesseract` CLI binary rather than linking against `libtesseract`
//! directly: no FFI, no in-process model weights, one process per image so a crash or
//! runaway page never takes the host process down with it.

use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::core::config::OcrConfig;
use crate::plugins::{OcrBackend, OcrBackendType, Plugin};
use crate::types::{ExtractionResult, FormatMetadata, Metadata, OcrMetadata, TesseractConfig};
use crate::{KreuzbergError, Result};

use super::error::OcrError;
use super::validation::{TESSERACT_SUPPORTED_LANGUAGE_CODES, validate_language};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runs Tesseract as a subprocess, with a semaphore bounding how many instances run at once.
pub struct TesseractBackend {
    semaphore: Arc<Semaphore>,
    version: OnceLock<u32>,
}

impl TesseractBackend {
    /// Probe `tesseract --version`, failing fast if the binary is missing or too old.
    pub fn new() -> std::result::Result<Self, OcrError> {
        let backend = Self {
            semaphore: Arc::new(Semaphore::new(num_cpus::get().max(1))),
            version: OnceLock::new(),
        };
        let major = backend.probe_version()?;
        let _ = backend.version.set(major);
        Ok(backend)
    }

    fn probe_version(&self) -> std::result::Result<u32, OcrError> {
        let output = std::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .map_err(|e| OcrError::TesseractInitializationFailed(format!("failed to spawn tesseract: {e}")))?;

        let text = String::from_utf8_lossy(&output.stdout);
        let first_line = text.lines().next().unwrap_or_default();
        let version_token = first_line.split_whitespace().nth(1).unwrap_or_default();
        let major: u32 = version_token
            .split('.')
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                OcrError::TesseractInitializationFailed(format!("could not parse tesseract version from '{first_line}'"))
            })?;

        if major < 5 {
            return Err(OcrError::TesseractInitializationFailed(format!(
                "tesseract {major} found, but version 5 or newer is required"
            )));
        }

        Ok(major)
    }

    async fn run(&self, image_bytes: &[u8], config: &OcrConfig) -> std::result::Result<(String, Vec<crate::types::Table>), OcrError> {
        let _permit = self.semaphore.acquire().await.expect("semaphore never closed");

        let tesseract_config = config.tesseract_config.clone().unwrap_or_default();
        validate_language(&config.language)?;

        let input_file = tempfile::Builder::new().suffix(".png").tempfile()?;
        std::fs::write(input_file.path(), image_bytes)?;

        let output_base = tempfile::Builder::new().tempfile()?;
        let output_base_path = output_base.path().to_path_buf();
        drop(output_base);

        let result = self
            .invoke(input_file.path(), &output_base_path, &config.language, &tesseract_config)
            .await;

        let _ = std::fs::remove_file(output_base_path.with_extension("txt"));
        let _ = std::fs::remove_file(output_base_path.with_extension("tsv"));

        result
    }

    async fn invoke(
        &self,
        input_path: &Path,
        output_base: &Path,
        language: &str,
        config: &TesseractConfig,
    ) -> std::result::Result<(String, Vec<crate::types::Table>), OcrError> {
        let text = self
            .invoke_with_config(input_path, output_base, language, config, "txt")
            .await?;

        let tables = if config.enable_table_detection {
            let tsv = self
                .invoke_with_config(input_path, output_base, language, config, "tsv")
                .await
                .unwrap_or_default();
            let words = super::table::extract_words_from_tsv(&tsv);
            let cells = super::table::reconstruct_table(
                &words,
                config.table_column_threshold,
                config.table_row_threshold_ratio,
            );
            if cells.is_empty() {
                Vec::new()
            } else {
                vec![crate::types::Table { markdown: super::table::table_to_markdown(&cells), cells, page_number: 1 }]
            }
        } else {
            Vec::new()
        };

        Ok((normalize_whitespace(&text), tables))
    }

    async fn invoke_with_config(
        &self,
        input_path: &Path,
        output_base: &Path,
        language: &str,
        config: &TesseractConfig,
        output_kind: &str,
    ) -> std::result::Result<String, OcrError> {
        let mut cmd = Command::new("tesseract");
        cmd.arg(input_path)
            .arg(output_base)
            .arg("-l")
            .arg(language)
            .arg("--psm")
            .arg(config.psm.to_string())
            .arg("--oem")
            .arg("1")
            .arg("--loglevel")
            .arg("OFF")
            .arg(output_kind);

        for (key, value) in tesseract_variables(config) {
            cmd.arg("-c").arg(format!("{key}={value}"));
        }

        if cfg!(target_os = "linux") {
            cmd.env("OMP_THREAD_LIMIT", "1");
        }

        cmd.stdout(std::process::Stdio::null());
        cmd.stderr(std::process::Stdio::piped());

        let child = cmd.spawn()?;
        let output = tokio::time::timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS), child.wait_with_output())
            .await
            .map_err(|_| OcrError::Timeout { seconds: DEFAULT_TIMEOUT_SECS })??;

        if !output.status.success() {
            return Err(OcrError::CommandFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let output_path = output_base.with_extension(output_kind);
        let text = std::fs::read_to_string(&output_path)?;
        let _ = std::fs::remove_file(&output_path);
        Ok(text)
    }
}

/// Map boolean `TesseractConfig` fields to `-c key=value` flags, encoding booleans as `1`/`0`.
fn tesseract_variables(config: &TesseractConfig) -> Vec<(&'static str, &'static str)> {
    let b = |v: bool| if v { "1" } else { "0" };
    vec![
        ("classify_use_pre_adapted_templates", b(config.classify_use_pre_adapted_templates)),
        ("language_model_ngram_on", b(config.language_model_ngram_on)),
        ("tessedit_dont_blkrej_good_wds", b(config.tessedit_dont_blkrej_good_wds)),
        ("tessedit_dont_rowrej_good_wds", b(config.tessedit_dont_rowrej_good_wds)),
        ("tessedit_enable_dict_correction", b(config.tessedit_enable_dict_correction)),
        ("tessedit_use_primary_params_model", b(config.tessedit_use_primary_params_model)),
        ("textord_space_size_is_variable", b(config.textord_space_size_is_variable)),
        ("thresholding_method", b(config.thresholding_method)),
    ]
}

fn normalize_whitespace(text: &str) -> String {
    let collapsed: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.trim().to_string()
}

impl Plugin for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        self.version.get().map(|v| v.to_string()).unwrap_or_else(|| "unknown".to_string())
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    async fn process_image(&self, image_bytes: &[u8], config: &OcrConfig) -> Result<ExtractionResult> {
        let (text, tables) = self
            .run(image_bytes, config)
            .await
            .map_err(|e| KreuzbergError::ocr(e.to_string()))?;

        let tesseract_config = config.tesseract_config.clone().unwrap_or_default();
        let table_dims = tables.first().map(|t| (t.cells.len(), t.cells.first().map(|r| r.len()).unwrap_or(0)));

        let mut metadata = Metadata::default();
        metadata.format = Some(FormatMetadata::Ocr(OcrMetadata {
            language: config.language.clone(),
            psm: tesseract_config.psm,
            output_format: "text".to_string(),
            table_count: tables.len(),
            table_rows: table_dims.map(|(r, _)| r),
            table_cols: table_dims.map(|(_, c)| c),
        }));

        Ok(ExtractionResult {
            content: text,
            mime_type: std::borrow::Cow::Borrowed("text/plain"),
            metadata,
            tables,
            detected_languages: None,
            chunks: None,
            images: None,
            djot_content: None,
            document_type: None,
            image_ocr_results: None,
            pages: None,
            elements: None,
        })
    }

    fn supports_language(&self, language: &str) -> bool {
        validate_language(language).is_ok()
    }

    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn supported_languages(&self) -> Vec<String> {
        TESSERACT_SUPPORTED_LANGUAGE_CODES.iter().map(|s| s.to_string()).collect()
    }

    fn supports_table_detection(&self) -> bool {
        true
    }
}
