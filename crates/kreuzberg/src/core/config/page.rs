//! Page-range selection for multi-page documents (PDF, presentations).

use serde::{Deserialize, Serialize};

/// Enables per-page/per-slide boundary tracking for multi-page documents.
///
/// Not part of the core option set in the data model, but needed by any caller
/// that wants per-page content and byte boundaries rather than one flat string;
/// kept as a small opt-in nested config rather than new top-level fields on
/// every extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Track page/slide boundaries and populate `ExtractionResult.pages`.
    #[serde(default)]
    pub extract_pages: bool,

    /// Insert a marker string at each page/slide boundary in `content`.
    #[serde(default)]
    pub insert_page_markers: bool,

    /// Marker template inserted when `insert_page_markers` is set. `{page_num}`
    /// is replaced with the 1-indexed page/slide number.
    #[serde(default = "default_marker_format")]
    pub marker_format: String,
}

fn default_marker_format() -> String {
    "<!-- PAGE {page_num} -->".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            extract_pages: false,
            insert_page_markers: false,
            marker_format: default_marker_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disables_tracking() {
        let config = PageConfig::default();
        assert!(!config.extract_pages);
        assert!(!config.insert_page_markers);
        assert_eq!(config.marker_format, "<!-- PAGE {page_num} -->");
    }

    #[test]
    fn marker_format_substitutes_page_num() {
        let config = PageConfig {
            extract_pages: true,
            insert_page_markers: true,
            marker_format: "\n\n<!-- PAGE {page_num} -->\n\n".to_string(),
        };
        assert_eq!(config.marker_format.replace("{page_num}", "3"), "\n\n<!-- PAGE 3 -->\n\n");
    }
}
