//! Error taxonomy used across extraction, OCR and the plugin registries.
//!
//! Four kinds matter to callers: [`KreuzbergError::Validation`] and
//! [`KreuzbergError::MissingDependency`] are never retried, [`KreuzbergError::Parsing`]
//! aggregates sub-task failures from a single document, and [`KreuzbergError::Ocr`]
//! surfaces at the top level for whole-document OCR but is caught and turned into a
//! skipped result for embedded-image OCR.

use std::fmt;
use std::time::SystemTime;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KreuzbergError>;

#[derive(Debug, Error)]
pub enum KreuzbergError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency '{dependency}': {hint}")]
    MissingDependency { dependency: String, hint: String },

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Unsupported MIME type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl KreuzbergError {
    pub fn parsing(message: impl Into<String>) -> Self {
        KreuzbergError::Parsing { message: message.into(), source: None }
    }

    pub fn parsing_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        KreuzbergError::Parsing { message: message.into(), source: Some(Box::new(source)) }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        KreuzbergError::Validation { message: message.into(), source: None }
    }

    pub fn ocr(message: impl Into<String>) -> Self {
        KreuzbergError::Ocr { message: message.into(), source: None }
    }

    pub fn missing_dependency(dependency: impl Into<String>, hint: impl Into<String>) -> Self {
        KreuzbergError::MissingDependency { dependency: dependency.into(), hint: hint.into() }
    }

    pub fn plugin(plugin_name: impl Into<String>, message: impl Into<String>) -> Self {
        KreuzbergError::Plugin { message: message.into(), plugin_name: plugin_name.into() }
    }

    /// Never retried: validation, missing dependency, parsing and unsupported-format
    /// errors all indicate the input or environment, not a transient condition.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Closed set of patterns that mark an [`std::io::Error`] (or subprocess failure text)
/// as transient rather than a hard failure. Only PDF-open errors consult this; every
/// other error kind in [`KreuzbergError`] is never retried.
const TRANSIENT_PATTERNS: &[&str] = &[
    "temporary",
    "locked",
    "in use",
    "too many open files",
    "cannot allocate memory",
    "resource temporarily unavailable",
    "connection reset",
    "broken pipe",
];

pub fn is_transient_io_error(err: &std::io::Error) -> bool {
    use std::io::ErrorKind::*;
    matches!(
        err.kind(),
        TimedOut | ConnectionReset | ConnectionAborted | WouldBlock | Interrupted | PermissionDenied
    ) || is_transient_message(&err.to_string())
}

pub fn is_transient_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSIENT_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// Best-effort contextual envelope attached to an error at the point it's reported to
/// a caller, per the documented error-context requirements: an ISO-8601 timestamp, the
/// operation that failed, and optionally which file/descriptor and nested error it came
/// from.
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub timestamp: SystemTime,
    pub file_info: Option<String>,
    pub nested: Option<String>,
    pub system_snapshot: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            timestamp: SystemTime::now(),
            file_info: None,
            nested: None,
            system_snapshot: None,
        }
    }

    pub fn with_file_info(mut self, file_info: impl Into<String>) -> Self {
        self.file_info = Some(file_info.into());
        self
    }

    pub fn with_nested(mut self, nested: impl fmt::Display) -> Self {
        self.nested = Some(nested.to_string());
        self
    }

    pub fn with_system_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.system_snapshot = Some(snapshot.into());
        self
    }

    fn timestamp_iso8601(&self) -> String {
        let duration = self
            .timestamp
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();
        humantime_iso8601(duration.as_secs())
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] operation={}", self.timestamp_iso8601(), self.operation)?;
        if let Some(file_info) = &self.file_info {
            write!(f, " file={}", file_info)?;
        }
        if let Some(nested) = &self.nested {
            write!(f, " nested={}", nested)?;
        }
        if let Some(snapshot) = &self.system_snapshot {
            write!(f, " system={}", snapshot)?;
        }
        Ok(())
    }
}

/// Minimal UTC ISO-8601 formatter so the crate doesn't need a datetime dependency
/// purely for this one call site.
fn humantime_iso8601(total_secs: u64) -> String {
    const SECS_PER_DAY: u64 = 86_400;
    let days = total_secs / SECS_PER_DAY;
    let secs_of_day = total_secs % SECS_PER_DAY;
    let (hour, min, sec) = (secs_of_day / 3600, (secs_of_day / 60) % 60, secs_of_day % 60);

    let mut year = 1970i64;
    let mut remaining_days = days as i64;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let month_lengths = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };
    let mut month = 1u32;
    for &len in &month_lengths {
        if remaining_days < len {
            break;
        }
        remaining_days -= len;
        month += 1;
    }
    let day = remaining_days + 1;

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}:{sec:02}Z")
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl From<serde_json::Error> for KreuzbergError {
    fn from(err: serde_json::Error) -> Self {
        KreuzbergError::parsing(err.to_string())
    }
}

impl From<calamine::Error> for KreuzbergError {
    fn from(err: calamine::Error) -> Self {
        KreuzbergError::parsing(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for KreuzbergError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        KreuzbergError::parsing(err.to_string())
    }
}

impl From<toml::de::Error> for KreuzbergError {
    fn from(err: toml::de::Error) -> Self {
        KreuzbergError::parsing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_display_uses_message() {
        let err = KreuzbergError::parsing("bad table row");
        assert_eq!(err.to_string(), "bad table row");
    }

    #[test]
    fn validation_is_never_retryable() {
        let err = KreuzbergError::validation("missing field");
        assert!(!err.is_retryable());
    }

    #[test]
    fn transient_message_matches_closed_set() {
        assert!(is_transient_message("Too many open files"));
        assert!(is_transient_message("resource temporarily unavailable"));
        assert!(!is_transient_message("invalid password"));
    }

    #[test]
    fn error_context_formats_fields() {
        let ctx = ErrorContext::new("pdf_open").with_file_info("doc.pdf");
        let rendered = ctx.to_string();
        assert!(rendered.contains("operation=pdf_open"));
        assert!(rendered.contains("file=doc.pdf"));
    }

    #[test]
    fn iso8601_epoch_formats_correctly() {
        assert_eq!(humantime_iso8601(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn iso8601_handles_leap_day() {
        // 2020-02-29 is day 1155 + 31 days into the year... verify a known timestamp instead.
        let secs = 1_582_934_400; // 2020-02-29T00:00:00Z
        assert_eq!(humantime_iso8601(secs), "2020-02-29T00:00:00Z");
    }
}
