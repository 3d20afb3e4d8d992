//! Post-processor registry implementation.

use crate::Result;
use crate::plugins::PostProcessor;
use crate::plugins::processor::ProcessingStage;
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    processor: Arc<dyn PostProcessor>,
    priority: i32,
}

/// Registry for post-processor plugins.
///
/// Unlike [`super::DocumentExtractorRegistry`], priority isn't a property of the
/// plugin itself: it's supplied at registration time, so the same processor type
/// can run earlier or later depending on who wires it up.
pub struct PostProcessorRegistry {
    entries: HashMap<String, Entry>,
}

impl PostProcessorRegistry {
    /// Create a new empty post-processor registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a post-processor with an explicit priority.
    ///
    /// Within the same [`ProcessingStage`], higher priority runs first.
    pub fn register(&mut self, processor: Arc<dyn PostProcessor>, priority: i32) -> Result<()> {
        let name = processor.name().to_string();
        super::validate_plugin_name(&name)?;
        processor.initialize()?;
        self.entries.insert(name, Entry { processor, priority });
        Ok(())
    }

    /// Remove a post-processor by name. Silent no-op if absent.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let Some(entry) = self.entries.remove(name) else {
            return Ok(());
        };
        entry.processor.shutdown()
    }

    /// List all registered post-processor names.
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// All post-processors for a given stage, highest priority first.
    ///
    /// Processors with equal priority keep an unspecified but stable relative
    /// order (`HashMap` iteration order is not registration order).
    pub fn for_stage(&self, stage: ProcessingStage) -> Vec<Arc<dyn PostProcessor>> {
        let mut matching: Vec<&Entry> = self
            .entries
            .values()
            .filter(|e| e.processor.processing_stage() == stage)
            .collect();
        matching.sort_by(|a, b| b.priority.cmp(&a.priority));
        matching.into_iter().map(|e| Arc::clone(&e.processor)).collect()
    }

    /// Shut down and clear every registered post-processor.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let names = self.list();
        for name in names {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for PostProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
