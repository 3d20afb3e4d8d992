use std::fmt;

#[derive(Debug, Clone)]
pub enum PdfError {
    InvalidPdf(String),
    PasswordRequired,
    InvalidPassword,
    EncryptionNotSupported(String),
    PageNotFound(usize),
    TextExtractionFailed(String),
    RenderingFailed(String),
    MetadataExtractionFailed(String),
    ExtractionFailed(String),
    FontLoadingFailed(String),
    IOError(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::InvalidPdf(msg) => write!(f, "Invalid PDF: {}", msg),
            PdfError::PasswordRequired => write!(f, "PDF is password-protected"),
            PdfError::InvalidPassword => write!(f, "Invalid password provided"),
            PdfError::EncryptionNotSupported(msg) => {
                write!(f, "Encryption not supported: {}", msg)
            }
            PdfError::PageNotFound(page) => write!(f, "Page {} not found", page),
            PdfError::TextExtractionFailed(msg) => write!(f, "Text extraction failed: {}", msg),
            PdfError::RenderingFailed(msg) => write!(f, "Page rendering failed: {}", msg),
            PdfError::MetadataExtractionFailed(msg) => {
                write!(f, "Metadata extraction failed: {}", msg)
            }
            PdfError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            PdfError::FontLoadingFailed(msg) => write!(f, "Font loading failed: {}", msg),
            PdfError::IOError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for PdfError {}

// NOTE: No From<std::io::Error> impl - IO errors must bubble up unchanged per error handling policy

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => PdfError::IOError(io_err.to_string()),
            _ => PdfError::InvalidPdf(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Format a pdfium error for display.
///
/// The kreuzberg-pdfium-render fork's error type doesn't implement Display,
/// so Debug formatting produces messages like "PdfiumLibraryInternalError(FormatError,)"
/// with trailing commas and parentheses. This function cleans up the formatting.
pub(crate) fn format_pdfium_error<E: std::fmt::Debug>(error: E) -> String {
    let debug_msg = format!("{:?}", error);

    // Extract the variant name and clean up Debug formatting
    // "PdfiumLibraryInternalError(FormatError,)" -> "PdfiumLibraryInternalError: FormatError"
    // "SomeError" -> "SomeError"
    if let Some(paren_idx) = debug_msg.find('(') {
        let variant = &debug_msg[..paren_idx];
        let inner = &debug_msg[paren_idx + 1..];

        // Remove trailing ",)" or ")"
        let inner_clean = inner.trim_end_matches(')').trim_end_matches(',');

        if inner_clean.is_empty() {
            variant.to_string()
        } else {
            format!("{}: {}", variant, inner_clean)
        }
    } else {
        debug_msg
    }
}
