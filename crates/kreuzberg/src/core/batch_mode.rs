//! Internal batch-mode tracking using tokio task-local storage.
//!
//! Lets extractors (PDF in particular) tell whether they're running inside
//! `batch_extract_file`/`batch_extract_bytes` without threading an extra flag through
//! every call. When true, CPU-heavy work is routed through `spawn_blocking` so it
//! doesn't starve the batch's other concurrent tasks.

use std::cell::Cell;

use tokio::task_local;

task_local! {
    static BATCH_MODE: Cell<bool>;
}

/// Whether the current task is running as part of a batch extraction.
///
/// Returns `false` outside of [`with_batch_mode`] (single-file extraction).
pub fn is_batch_mode() -> bool {
    BATCH_MODE.try_with(|cell| cell.get()).unwrap_or(false)
}

/// Run `future` with the batch-mode flag set for its duration.
pub async fn with_batch_mode<F, T>(future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    BATCH_MODE.scope(Cell::new(true), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_mode_is_false_outside_scope() {
        assert!(!is_batch_mode());
    }

    #[tokio::test]
    async fn batch_mode_is_true_inside_scope() {
        let observed = with_batch_mode(async { is_batch_mode() }).await;
        assert!(observed);
    }
}
