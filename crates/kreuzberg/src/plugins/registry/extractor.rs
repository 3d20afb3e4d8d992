//! Document extractor registry implementation.
//!
//! Holds two ordered lists of extractors - `registered` (added by callers at
//! runtime) and `default` (the built-in set assembled at process start) - and
//! tries them in that order for a MIME type lookup. Results are memoized by
//! `(mime_type, config identity)` so repeated extraction calls with the same
//! config don't re-walk both lists.

use crate::core::config::ExtractionConfig;
use crate::plugins::DocumentExtractor;
use crate::Result;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Registry for document extractor plugins.
///
/// # Thread Safety
///
/// `registered` and `default` are each guarded by their own `parking_lot::RwLock`,
/// and the lookup cache is a `DashMap`, so reads and writes can proceed concurrently
/// without a single global lock serializing every extraction call.
pub struct DocumentExtractorRegistry {
    registered: RwLock<Vec<Arc<dyn DocumentExtractor>>>,
    default: RwLock<Vec<Arc<dyn DocumentExtractor>>>,
    cache: DashMap<(String, u64), Option<Arc<dyn DocumentExtractor>>>,
}

/// Hashes the parts of `ExtractionConfig` that influence extractor selection.
///
/// This is a cache key, not an equality check: a collision only costs a redundant
/// lookup, never an incorrect one, so hashing the serialized config is enough and
/// avoids needing `Hash`/`Eq` on every nested option (several carry `f64` fields).
fn config_identity(config: &ExtractionConfig) -> u64 {
    let mut hasher = ahash::AHasher::default();
    match serde_json::to_vec(config) {
        Ok(bytes) => bytes.hash(&mut hasher),
        Err(_) => 0u8.hash(&mut hasher),
    }
    hasher.finish()
}

fn mime_matches(declared: &str, mime_type: &str) -> bool {
    if declared == mime_type {
        return true;
    }
    if let Some(prefix) = declared.strip_suffix("/*") {
        return mime_type.starts_with(prefix);
    }
    false
}

impl DocumentExtractorRegistry {
    /// Create a new empty extractor registry.
    pub fn new() -> Self {
        Self {
            registered: RwLock::new(Vec::new()),
            default: RwLock::new(Vec::new()),
            cache: DashMap::new(),
        }
    }

    /// Register a user-supplied extractor, appended to `registered` in insertion
    /// order (first added, first tried; tried before every `default` extractor).
    pub fn register(&self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        self.insert(&self.registered, extractor)
    }

    /// Register a built-in extractor into the `default` list.
    ///
    /// Used once at process start to assemble the closed built-in set; never
    /// exposed to callers, who only ever add to `registered` via [`Self::register`].
    pub fn register_default(&self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        self.insert(&self.default, extractor)
    }

    fn insert(&self, list: &RwLock<Vec<Arc<dyn DocumentExtractor>>>, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let name = extractor.name().to_string();
        let mime_types: Vec<String> = extractor.supported_mime_types().iter().map(|s| s.to_string()).collect();

        if let Err(e) = super::validate_plugin_name(&name) {
            tracing::warn!(
                "Failed to validate document extractor name '{}': {}. Registration aborted.",
                name,
                e
            );
            return Err(e);
        }

        if let Err(e) = extractor.initialize() {
            tracing::error!(
                "Failed to initialize document extractor '{}': {}. Extraction for MIME types {:?} will be unavailable.",
                name,
                e,
                mime_types
            );
            return Err(e);
        }

        list.write().push(extractor);
        self.cache.clear();
        tracing::debug!("Registered document extractor '{}' for MIME types: {:?}", name, mime_types);
        Ok(())
    }

    /// Look up the extractor that should handle `mime_type` under `config`.
    ///
    /// Walks `registered` then `default`, returning the first extractor whose
    /// supported MIME set contains `mime_type` exactly or as a wildcard prefix
    /// (`"image/*"` matching `"image/png"`). Never raises: `None` means the
    /// caller should surface an unsupported-format error itself.
    #[cfg_attr(feature = "otel", tracing::instrument(
        skip(self, config),
        fields(
            registry.mime_type = %mime_type,
            registry.found = tracing::field::Empty,
        )
    ))]
    pub fn get(&self, mime_type: &str, config: &ExtractionConfig) -> Option<Arc<dyn DocumentExtractor>> {
        let key = (mime_type.to_string(), config_identity(config));
        if let Some(cached) = self.cache.get(&key) {
            #[cfg(feature = "otel")]
            tracing::Span::current().record("registry.found", cached.is_some());
            return cached.clone();
        }

        let found = {
            let registered = self.registered.read();
            let default = self.default.read();
            registered
                .iter()
                .chain(default.iter())
                .find(|extractor| extractor.supported_mime_types().iter().any(|declared| mime_matches(declared, mime_type)))
                .cloned()
        };

        #[cfg(feature = "otel")]
        tracing::Span::current().record("registry.found", found.is_some());
        self.cache.insert(key, found.clone());
        found
    }

    /// List all registered extractor names, `registered` first then `default`.
    pub fn list(&self) -> Vec<String> {
        self.registered
            .read()
            .iter()
            .chain(self.default.read().iter())
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Remove an extractor by name from either list. Silent no-op if absent.
    pub fn remove(&self, name: &str) -> Result<()> {
        let removed = Self::take(&self.registered, name).or_else(|| Self::take(&self.default, name));

        let Some(extractor) = removed else {
            tracing::debug!(
                "Document extractor '{}' not found in registry (already removed or never registered)",
                name
            );
            return Ok(());
        };

        self.cache.clear();

        if let Err(e) = extractor.shutdown() {
            tracing::warn!(
                "Failed to shutdown document extractor '{}': {}. Resources may not have been properly released.",
                name,
                e
            );
            return Err(e);
        }
        tracing::debug!("Successfully removed and shut down document extractor '{}'", name);
        Ok(())
    }

    fn take(list: &RwLock<Vec<Arc<dyn DocumentExtractor>>>, name: &str) -> Option<Arc<dyn DocumentExtractor>> {
        let mut list = list.write();
        let index = list.iter().position(|e| e.name() == name)?;
        Some(list.remove(index))
    }

    /// Shut down and clear every extractor in both lists.
    pub fn shutdown_all(&self) -> Result<()> {
        let names = self.list();
        let count = names.len();

        if count > 0 {
            tracing::debug!("Shutting down {} document extractors", count);
        }

        for name in names {
            self.remove(&name)?;
        }

        if count > 0 {
            tracing::debug!("Successfully shut down all {} document extractors", count);
        }
        Ok(())
    }
}

impl Default for DocumentExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExtractionConfig;
    use crate::plugins::Plugin;
    use crate::types::ExtractionResult;
    use async_trait::async_trait;
    use std::borrow::Cow;

    struct MockExtractor {
        name: String,
        mime_types: &'static [&'static str],
    }

    impl Plugin for MockExtractor {
        fn name(&self) -> &str {
            &self.name
        }
        fn version(&self) -> String {
            "1.0.0".to_string()
        }
        fn initialize(&self) -> Result<()> {
            Ok(())
        }
        fn shutdown(&self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentExtractor for MockExtractor {
        async fn extract_bytes(&self, _: &[u8], _: &str, _: &ExtractionConfig) -> Result<ExtractionResult> {
            Ok(ExtractionResult {
                content: "test".to_string(),
                mime_type: Cow::Borrowed("text/plain"),
                metadata: crate::types::Metadata::default(),
                tables: vec![],
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

        fn supported_mime_types(&self) -> &[&str] {
            self.mime_types
        }
    }

    fn extractor(name: &str, mime_types: &'static [&'static str]) -> Arc<MockExtractor> {
        Arc::new(MockExtractor {
            name: name.to_string(),
            mime_types,
        })
    }

    #[test]
    fn exact_match() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("pdf-extractor", &["application/pdf"])).unwrap();

        let config = ExtractionConfig::default();
        let retrieved = registry.get("application/pdf", &config).unwrap();
        assert_eq!(retrieved.name(), "pdf-extractor");
        assert_eq!(registry.list(), vec!["pdf-extractor".to_string()]);
    }

    #[test]
    fn prefix_match() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("image-extractor", &["image/*"])).unwrap();

        let config = ExtractionConfig::default();
        assert_eq!(registry.get("image/png", &config).unwrap().name(), "image-extractor");
        assert_eq!(registry.get("image/jpeg", &config).unwrap().name(), "image-extractor");
    }

    #[test]
    fn registered_is_tried_before_default() {
        let registry = DocumentExtractorRegistry::new();
        registry
            .register_default(extractor("builtin-pdf", &["application/pdf"]))
            .unwrap();
        registry.register(extractor("custom-pdf", &["application/pdf"])).unwrap();

        let config = ExtractionConfig::default();
        assert_eq!(registry.get("application/pdf", &config).unwrap().name(), "custom-pdf");
    }

    #[test]
    fn insertion_order_within_a_list_is_first_match_wins() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("first", &["application/pdf"])).unwrap();
        registry.register(extractor("second", &["application/pdf"])).unwrap();

        let config = ExtractionConfig::default();
        assert_eq!(registry.get("application/pdf", &config).unwrap().name(), "first");
    }

    #[test]
    fn not_found_returns_none_rather_than_erroring() {
        let registry = DocumentExtractorRegistry::new();
        let config = ExtractionConfig::default();
        assert!(registry.get("application/unknown", &config).is_none());
    }

    #[test]
    fn remove_drops_from_either_list() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("test-extractor", &["text/plain"])).unwrap();

        let config = ExtractionConfig::default();
        assert!(registry.get("text/plain", &config).is_some());

        registry.remove("test-extractor").unwrap();
        assert!(registry.get("text/plain", &config).is_none());
    }

    #[test]
    fn remove_nonexistent_is_a_silent_no_op() {
        let registry = DocumentExtractorRegistry::new();
        assert!(registry.remove("nonexistent-extractor").is_ok());
        assert_eq!(registry.list().len(), 0);
    }

    #[test]
    fn shutdown_all_clears_both_lists() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("extractor1", &["text/plain"])).unwrap();
        registry.register_default(extractor("extractor2", &["application/pdf"])).unwrap();

        assert_eq!(registry.list().len(), 2);
        registry.shutdown_all().unwrap();
        assert_eq!(registry.list().len(), 0);
    }

    #[test]
    fn default_registry_is_empty() {
        let registry = DocumentExtractorRegistry::default();
        assert_eq!(registry.list().len(), 0);
    }

    #[test]
    fn add_or_remove_invalidates_the_lookup_cache() {
        let registry = DocumentExtractorRegistry::new();
        let config = ExtractionConfig::default();

        assert!(registry.get("text/plain", &config).is_none());

        registry.register(extractor("late-arrival", &["text/plain"])).unwrap();
        assert_eq!(registry.get("text/plain", &config).unwrap().name(), "late-arrival");

        registry.remove("late-arrival").unwrap();
        assert!(registry.get("text/plain", &config).is_none());
    }

    #[test]
    fn different_configs_are_cached_independently() {
        let registry = DocumentExtractorRegistry::new();
        registry.register(extractor("pdf-extractor", &["application/pdf"])).unwrap();

        let mut other = ExtractionConfig::default();
        other.force_ocr = true;

        assert_eq!(
            registry.get("application/pdf", &ExtractionConfig::default()).unwrap().name(),
            "pdf-extractor"
        );
        assert_eq!(registry.get("application/pdf", &other).unwrap().name(), "pdf-extractor");
    }

    #[test]
    fn invalid_name_empty_is_rejected() {
        let registry = DocumentExtractorRegistry::new();
        let result = registry.register(extractor("", &["text/plain"]));
        assert!(matches!(result, Err(crate::KreuzbergError::Validation { .. })));
    }

    #[test]
    fn invalid_name_with_whitespace_is_rejected() {
        let registry = DocumentExtractorRegistry::new();
        let result = registry.register(extractor("my extractor", &["text/plain"]));
        assert!(matches!(result, Err(crate::KreuzbergError::Validation { .. })));
    }

    #[test]
    fn multiple_mime_types_all_resolve() {
        let registry = DocumentExtractorRegistry::new();
        registry
            .register(extractor("multi-extractor", &["text/plain", "text/markdown", "text/html"]))
            .unwrap();

        let config = ExtractionConfig::default();
        assert_eq!(registry.get("text/plain", &config).unwrap().name(), "multi-extractor");
        assert_eq!(registry.get("text/markdown", &config).unwrap().name(), "multi-extractor");
        assert_eq!(registry.get("text/html", &config).unwrap().name(), "multi-extractor");
    }

    struct FailingExtractor {
        name: String,
    }

    impl Plugin for FailingExtractor {
        fn name(&self) -> &str {
            &self.name
        }
        fn version(&self) -> String {
            "1.0.0".to_string()
        }
        fn initialize(&self) -> Result<()> {
            Err(crate::KreuzbergError::Plugin {
                message: "extractor initialization failed".to_string(),
                plugin_name: self.name.clone(),
            })
        }
        fn shutdown(&self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentExtractor for FailingExtractor {
        async fn extract_bytes(&self, _: &[u8], _: &str, _: &ExtractionConfig) -> Result<ExtractionResult> {
            unreachable!("initialize fails before extraction is ever attempted")
        }

        fn supported_mime_types(&self) -> &[&str] {
            &["text/plain"]
        }
    }

    #[test]
    fn initialization_failure_keeps_the_extractor_out_of_the_registry() {
        let registry = DocumentExtractorRegistry::new();
        let extractor = Arc::new(FailingExtractor {
            name: "failing-extractor".to_string(),
        });

        assert!(registry.register(extractor).is_err());
        assert_eq!(registry.list().len(), 0);
    }
}
