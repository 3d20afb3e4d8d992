//! Language code allowlist and validation for the Tesseract subprocess backend.

use super::error::OcrError;

/// Tesseract-supported language codes (`tesseract --list-langs` on a standard install).
/// Multi-language requests join codes with `+`, e.g. `"eng+deu"`.
pub const TESSERACT_SUPPORTED_LANGUAGE_CODES: &[&str] = &[
    "eng", "deu", "fra", "spa", "ita", "por", "rus", "chi_sim", "chi_tra", "jpn", "kor", "ara", "hin", "ben", "tha",
    "vie", "heb", "tur", "pol", "nld", "swe", "dan", "fin", "nor", "ces", "hun", "ron", "ukr", "bul", "hrv", "srp",
    "slk", "slv", "lit", "lav", "est",
];

/// Validate a (possibly `+`-joined) language code against the supported allowlist.
pub fn validate_language(language: &str) -> Result<(), OcrError> {
    if language.trim().is_empty() {
        return Err(OcrError::InvalidLanguage("language code is empty".to_string()));
    }

    for part in language.split('+') {
        let part = part.trim();
        if part.is_empty() || !TESSERACT_SUPPORTED_LANGUAGE_CODES.contains(&part) {
            return Err(OcrError::InvalidLanguage(language.to_string()));
        }
    }

    Ok(())
}
