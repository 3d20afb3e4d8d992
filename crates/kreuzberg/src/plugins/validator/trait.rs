//! The `Validator` plugin trait.

use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;

/// A plugin that checks an [`ExtractionResult`] against some acceptance criteria.
///
/// Unlike [`crate::plugins::PostProcessor`], a validator never mutates the result;
/// it only decides whether the result is acceptable, returning `Err` to reject it.
#[async_trait]
pub trait Validator: Plugin {
    /// Validate `result`. Return `Err(KreuzbergError::Validation { .. })` (or any
    /// other error) to reject it.
    async fn validate(&self, result: &ExtractionResult, config: &ExtractionConfig) -> Result<()>;

    /// Whether this validator applies to `result` at all. Defaults to `true`;
    /// override to restrict validation to certain MIME types or content shapes.
    fn should_validate(&self, _result: &ExtractionResult, _config: &ExtractionConfig) -> bool {
        true
    }

    /// Relative ordering when multiple validators run; higher runs first. Defaults to 50.
    fn priority(&self) -> i32 {
        50
    }
}
