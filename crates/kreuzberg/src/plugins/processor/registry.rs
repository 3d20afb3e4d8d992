//! Post-processor registry management.
//!
//! This module provides functions for managing the global post-processor registry.

/// List all registered post-processors.
///
/// # Returns
///
/// A vector of post-processor names.
///
/// # Example
///
/// ```rust
/// use kreuzberg::plugins::list_post_processors;
///
/// let processors = list_post_processors()?;
/// for name in processors {
///     println!("Registered post-processor: {}", name);
/// }
/// # Ok::<(), kreuzberg::KreuzbergError>(())
/// ```
pub fn list_post_processors() -> crate::Result<Vec<String>> {
    use crate::plugins::registry::get_post_processor_registry;

    Ok(get_post_processor_registry().read().unwrap().list())
}
