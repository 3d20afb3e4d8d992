//! Post-extraction pipeline orchestration.
//!
//! Every extractor hands its raw [`ExtractionResult`] to [`run_pipeline`], which
//! runs registered post-processors (grouped into `Early`/`Middle`/`Late` stages),
//! the built-in quality, chunking and language-detection passes, validators, and
//! finally the requested output format conversion, in that fixed order.

mod features;
mod format;


use std::sync::{Arc, RwLock};

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::processor::ProcessingStage;
use crate::plugins::registry::{get_post_processor_registry, get_validator_registry};
use crate::plugins::PostProcessor;
use crate::types::ExtractionResult;

pub use format::apply_output_format;

struct ProcessorCache {
    early: Vec<Arc<dyn PostProcessor>>,
    middle: Vec<Arc<dyn PostProcessor>>,
    late: Vec<Arc<dyn PostProcessor>>,
}

static PROCESSOR_CACHE: RwLock<Option<ProcessorCache>> = RwLock::new(None);

/// Drop the cached, stage-sorted post-processor list.
///
/// The pipeline otherwise keeps reusing the list built on first use, so tests
/// (and callers) that register or remove post-processors at runtime must call
/// this before the next [`run_pipeline`] to see the change.
pub fn clear_processor_cache() -> Result<()> {
    *PROCESSOR_CACHE.write().unwrap() = None;
    Ok(())
}

fn processors_for_stage(stage: ProcessingStage) -> Vec<Arc<dyn PostProcessor>> {
    if let Some(cache) = PROCESSOR_CACHE.read().unwrap().as_ref() {
        return pick_stage(cache, stage);
    }

    let registry = get_post_processor_registry().read().unwrap();
    let cache = ProcessorCache {
        early: registry.for_stage(ProcessingStage::Early),
        middle: registry.for_stage(ProcessingStage::Middle),
        late: registry.for_stage(ProcessingStage::Late),
    };
    drop(registry);

    let picked = pick_stage(&cache, stage);
    *PROCESSOR_CACHE.write().unwrap() = Some(cache);
    picked
}

fn pick_stage(cache: &ProcessorCache, stage: ProcessingStage) -> Vec<Arc<dyn PostProcessor>> {
    match stage {
        ProcessingStage::Early => cache.early.clone(),
        ProcessingStage::Middle => cache.middle.clone(),
        ProcessingStage::Late => cache.late.clone(),
    }
}

fn processor_allowed(name: &str, config: &ExtractionConfig) -> bool {
    let Some(pp_config) = config.postprocessor.as_ref() else {
        return true;
    };

    if !pp_config.enabled {
        return false;
    }

    if let Some(ref disabled) = pp_config.disabled_set {
        if disabled.contains(name) {
            return false;
        }
    } else if let Some(ref disabled) = pp_config.disabled_processors
        && disabled.iter().any(|n| n == name)
    {
        return false;
    }

    if let Some(ref enabled) = pp_config.enabled_set {
        return enabled.contains(name);
    }
    if let Some(ref enabled) = pp_config.enabled_processors {
        return enabled.iter().any(|n| n == name);
    }

    true
}

async fn run_stage(stage: ProcessingStage, result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()> {
    for processor in processors_for_stage(stage) {
        if !processor_allowed(processor.name(), config) {
            continue;
        }
        if !processor.should_process(result, config) {
            continue;
        }
        processor.process(result, config).await?;
    }
    Ok(())
}

async fn run_validators(result: &ExtractionResult, config: &ExtractionConfig) -> Result<()> {
    let validators = get_validator_registry().read().unwrap().all_by_priority();
    for validator in validators {
        if !validator.should_validate(result, config) {
            continue;
        }
        validator.validate(result, config).await?;
    }
    Ok(())
}

/// Run the full post-extraction pipeline over `result`, returning the processed result.
///
/// Order is fixed: `Early` post-processors, quality cleanup/scoring, `Middle`
/// post-processors, chunking, language detection, `Late` post-processors,
/// validators, then output format conversion.
pub async fn run_pipeline(mut result: ExtractionResult, config: &ExtractionConfig) -> Result<ExtractionResult> {
    run_stage(ProcessingStage::Early, &mut result, config).await?;

    features::execute_quality_processing(&mut result, config);

    run_stage(ProcessingStage::Middle, &mut result, config).await?;

    features::execute_chunking(&mut result, config)?;
    features::execute_language_detection(&mut result, config)?;

    run_stage(ProcessingStage::Late, &mut result, config).await?;

    run_validators(&result, config).await?;

    format::apply_output_format(&mut result, config.output_format);

    Ok(result)
}
