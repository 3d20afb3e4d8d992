//! Post-processor plugin system.
//!
//! This module provides the trait and registry for implementing custom post-processors.

mod registry;
mod r#trait;

// Re-export trait and enum for backward compatibility
pub use r#trait::{PostProcessor, ProcessingStage};

// Re-export registry functions for backward compatibility
pub use registry::list_post_processors;
