//! The `PostProcessor` plugin trait.

use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;

/// Where in the pipeline a post-processor runs, relative to other post-processors.
///
/// Ordered `Early < Middle < Late`; the pipeline runs all `Early` processors,
/// then all `Middle`, then all `Late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessingStage {
    Early,
    Middle,
    Late,
}

/// A plugin that mutates an [`ExtractionResult`] in place after extraction.
///
/// Chunking, language detection, and quality scoring are all post-processors
/// running at different stages; custom post-processors register alongside them
/// through [`crate::plugins::registry::get_post_processor_registry`].
#[async_trait]
pub trait PostProcessor: Plugin {
    /// Mutate `result` in place.
    async fn process(&self, result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()>;

    /// Which stage this processor runs in.
    fn processing_stage(&self) -> ProcessingStage;

    /// Whether this processor should run on `result` at all. Defaults to `true`.
    fn should_process(&self, _result: &ExtractionResult, _config: &ExtractionConfig) -> bool {
        true
    }

    /// Rough cost estimate in milliseconds, used for scheduling/logging only. Defaults to 0.
    fn estimated_duration_ms(&self, _result: &ExtractionResult) -> u64 {
        0
    }
}
