//! Language detection using `whatlang`.
//!
//! Runs over the fully-extracted text as one of the universal post-extraction
//! steps (`core::pipeline`), gated by [`crate::core::config::LanguageDetectionConfig`].

use crate::Result;
use crate::core::config::LanguageDetectionConfig;
use whatlang::{Lang, detect};

/// Detects the dominant language of `text`, returning its ISO 639-3 code.
///
/// Returns `Ok(None)` when detection is disabled, the text is empty, no
/// language could be detected, the detected confidence falls below
/// `config.min_confidence`, or the detected language isn't in
/// `config.allowed_languages` (when that restriction is set).
pub fn detect_languages(text: &str, config: &LanguageDetectionConfig) -> Result<Option<Vec<String>>> {
    if !config.enabled || text.trim().is_empty() {
        return Ok(None);
    }

    let Some(info) = detect(text) else {
        return Ok(None);
    };

    if info.confidence() < config.min_confidence {
        return Ok(None);
    }

    let code = lang_to_iso639_3(info.lang());

    if let Some(allowed) = &config.allowed_languages
        && !allowed.contains(code)
    {
        return Ok(None);
    }

    Ok(Some(vec![code.to_string()]))
}

fn lang_to_iso639_3(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "eng",
        Lang::Rus => "rus",
        Lang::Cmn => "cmn",
        Lang::Spa => "spa",
        Lang::Por => "por",
        Lang::Ita => "ita",
        Lang::Fra => "fra",
        Lang::Deu => "deu",
        Lang::Ukr => "ukr",
        Lang::Kat => "kat",
        Lang::Ara => "ara",
        Lang::Hin => "hin",
        Lang::Jpn => "jpn",
        Lang::Heb => "heb",
        Lang::Yid => "yid",
        Lang::Pol => "pol",
        Lang::Amh => "amh",
        Lang::Jav => "jav",
        Lang::Kor => "kor",
        Lang::Nob => "nob",
        Lang::Dan => "dan",
        Lang::Swe => "swe",
        Lang::Fin => "fin",
        Lang::Tur => "tur",
        Lang::Nld => "nld",
        Lang::Hun => "hun",
        Lang::Ces => "ces",
        Lang::Ell => "ell",
        Lang::Bul => "bul",
        Lang::Bel => "bel",
        Lang::Mar => "mar",
        Lang::Kan => "kan",
        Lang::Ron => "ron",
        Lang::Slv => "slv",
        Lang::Hrv => "hrv",
        Lang::Srp => "srp",
        Lang::Mkd => "mkd",
        Lang::Lit => "lit",
        Lang::Lav => "lav",
        Lang::Est => "est",
        Lang::Tam => "tam",
        Lang::Vie => "vie",
        Lang::Urd => "urd",
        Lang::Tha => "tha",
        Lang::Guj => "guj",
        Lang::Uzb => "uzb",
        Lang::Pan => "pan",
        Lang::Aze => "aze",
        Lang::Ind => "ind",
        Lang::Tel => "tel",
        Lang::Pes => "pes",
        Lang::Mal => "mal",
        Lang::Ori => "ori",
        Lang::Mya => "mya",
        Lang::Nep => "nep",
        Lang::Sin => "sin",
        Lang::Khm => "khm",
        Lang::Tuk => "tuk",
        Lang::Aka => "aka",
        Lang::Zul => "zul",
        Lang::Sna => "sna",
        Lang::Afr => "afr",
        Lang::Lat => "lat",
        Lang::Slk => "slk",
        Lang::Cat => "cat",
        Lang::Tgl => "tgl",
        Lang::Hye => "hye",
        Lang::Epo => "epo",
        Lang::Ben => "ben",
        Lang::Cym => "cym",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LanguageDetectionConfig {
        LanguageDetectionConfig { enabled: true, min_confidence: 0.0, allowed_languages: None }
    }

    #[test]
    fn detects_english() {
        let text = "Hello world! This is a test of the language detection system.";
        let result = detect_languages(text, &config()).unwrap();
        assert_eq!(result, Some(vec!["eng".to_string()]));
    }

    #[test]
    fn detects_spanish() {
        let text = "Hola mundo! Esta es una prueba del sistema de detección de idiomas.";
        let result = detect_languages(text, &config()).unwrap();
        assert_eq!(result, Some(vec!["spa".to_string()]));
    }

    #[test]
    fn disabled_returns_none() {
        let mut config = config();
        config.enabled = false;
        assert!(detect_languages("Hello world!", &config).unwrap().is_none());
    }

    #[test]
    fn empty_text_returns_none() {
        assert!(detect_languages("", &config()).unwrap().is_none());
    }

    #[test]
    fn confidence_threshold_filters_result() {
        let mut config = config();
        config.min_confidence = 1.1;
        assert!(detect_languages("Hello world! This is English text.", &config).unwrap().is_none());
    }

    #[test]
    fn allowed_languages_restriction_filters_result() {
        let mut config = config();
        config.allowed_languages = Some(["fra".to_string()].into_iter().collect());
        assert!(
            detect_languages("Hello world! This is a test of the language detection system.", &config)
                .unwrap()
                .is_none()
        );
    }
}
