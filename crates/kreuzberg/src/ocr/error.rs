//! OCR-specific error type.
//!
//! Kept distinct from [`crate::KreuzbergError`] because the subprocess orchestrator needs
//! to distinguish "binary missing", "timed out" and "non-zero exit" before folding everything
//! into the crate-wide error at the call boundary.

use std::fmt;

#[derive(Debug)]
pub enum OcrError {
    /// The `tesseract` binary could not be located or `--version` failed to parse.
    TesseractInitializationFailed(String),
    /// Language code is empty or not in the supported allowlist.
    InvalidLanguage(String),
    /// The subprocess exited with a non-zero status.
    CommandFailed { status: Option<i32>, stderr: String },
    /// The subprocess did not finish within the configured timeout.
    Timeout { seconds: u64 },
    /// Filesystem error writing the temp image or reading the output text file.
    Io(std::io::Error),
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrError::TesseractInitializationFailed(msg) => write!(f, "tesseract initialization failed: {msg}"),
            OcrError::InvalidLanguage(lang) => write!(f, "unsupported OCR language code: {lang}"),
            OcrError::CommandFailed { status, stderr } => {
                write!(f, "tesseract exited with status {status:?}: {stderr}")
            }
            OcrError::Timeout { seconds } => write!(f, "tesseract did not finish within {seconds}s"),
            OcrError::Io(err) => write!(f, "OCR I/O error: {err}"),
        }
    }
}

impl std::error::Error for OcrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OcrError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OcrError {
    fn from(err: std::io::Error) -> Self {
        OcrError::Io(err)
    }
}

impl From<OcrError> for crate::KreuzbergError {
    fn from(err: OcrError) -> Self {
        crate::KreuzbergError::ocr(err.to_string())
    }
}
