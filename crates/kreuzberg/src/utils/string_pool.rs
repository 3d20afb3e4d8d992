//! String interning for frequently repeated strings (MIME types).
//!
//! `"application/pdf"` shows up thousands of times during batch extraction; interning
//! deduplicates the backing allocation so repeated extraction results share one `Arc`
//! instead of each owning its own copy.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use once_cell::sync::Lazy;

/// A deduplicated, reference-counted string handle.
#[derive(Clone)]
pub struct InternedString(Arc<String>);

impl InternedString {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for InternedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq for InternedString {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.as_str() == other.as_str()
    }
}

impl Eq for InternedString {}

impl std::ops::Deref for InternedString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

struct MimeStringPool {
    pool: DashMap<String, Arc<String>>,
    initialized: AtomicBool,
}

impl MimeStringPool {
    fn new() -> Self {
        MimeStringPool {
            pool: DashMap::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Pre-intern the MIME types the registry already knows about, deferred to first use.
    fn ensure_initialized(&self) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        for mime_type in crate::core::mime::KNOWN_MIME_TYPES {
            self.pool.entry(mime_type.to_string()).or_insert_with(|| Arc::new(mime_type.to_string()));
        }

        let _ = self.initialized.compare_exchange(false, true, Ordering::Release, Ordering::Relaxed);
    }

    fn get_or_intern(&self, mime_type: &str) -> Arc<String> {
        self.ensure_initialized();

        if let Some(entry) = self.pool.get(mime_type) {
            Arc::clone(&entry)
        } else {
            let arc_string = Arc::new(mime_type.to_string());
            self.pool.insert(mime_type.to_string(), Arc::clone(&arc_string));
            arc_string
        }
    }
}

static MIME_POOL: Lazy<MimeStringPool> = Lazy::new(MimeStringPool::new);

/// Get or intern a MIME type string.
///
/// Repeated calls with the same MIME type return handles backed by the same
/// allocation, so `InternedString` equality can short-circuit on pointer comparison.
pub fn intern_mime_type(mime_type: &str) -> InternedString {
    InternedString(MIME_POOL.get_or_intern(mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_same_mime_type() {
        let a = intern_mime_type("application/pdf");
        let b = intern_mime_type("application/pdf");
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn interns_unknown_mime_type() {
        let a = intern_mime_type("application/x-made-up");
        assert_eq!(a.as_str(), "application/x-made-up");
    }

    #[test]
    fn display_matches_source_string() {
        let a = intern_mime_type("text/html");
        assert_eq!(format!("{a}"), "text/html");
    }
}
