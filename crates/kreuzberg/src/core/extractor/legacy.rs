//! Synchronous extraction path for WASM targets, where the `tokio-runtime`
//! feature (and its multi-threaded executor) isn't available.
//!
//! Extractors are CPU-bound and never actually await I/O in a WASM build, so a
//! trivial single-poll executor is enough to drive their futures to completion
//! without pulling in a full async runtime.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::core::mime;
use crate::types::ExtractionResult;

fn noop_raw_waker() -> RawWaker {
    fn no_op(_: *const ()) {}
    fn clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }
    let vtable = &RawWakerVTable::new(clone, no_op, no_op, no_op);
    RawWaker::new(std::ptr::null(), vtable)
}

/// Drive `future` to completion, polling immediately and panicking if it would
/// ever actually need to wait. Only sound for futures that never await real I/O.
fn block_on<F: Future>(future: F) -> F::Output {
    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut future = Box::pin(future);
    match Pin::new(&mut future).poll(&mut cx) {
        Poll::Ready(value) => value,
        Poll::Pending => panic!("extraction future did not complete synchronously on a WASM target"),
    }
}

/// Synchronous, non-tokio implementation backing [`super::sync::extract_bytes_sync`]
/// when the `tokio-runtime` feature is disabled.
pub fn extract_bytes_sync_impl(
    content: &[u8],
    mime_type: Option<&str>,
    config: Option<&ExtractionConfig>,
) -> Result<ExtractionResult> {
    let default_config = ExtractionConfig::default();
    let config = config.unwrap_or(&default_config);

    let validated_mime = match mime_type {
        Some(mt) => mime::validate_mime_type(mt)?,
        None => mime::detect_mime_type_from_bytes(content)?,
    };

    crate::extractors::ensure_initialized()?;
    let extractor = crate::plugins::registry::get_document_extractor_registry()
        .get(&validated_mime, config)
        .ok_or_else(|| crate::KreuzbergError::UnsupportedFormat(validated_mime.clone()))?;

    block_on(extractor.extract_bytes(content, &validated_mime, config))
}
