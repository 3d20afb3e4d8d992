//! Stack-size management for HTML-to-Markdown conversion.
//!
//! `html-to-markdown-rs`'s recursive-descent parser can blow the default
//! thread stack on deeply nested or very large documents. Conversion work
//! above [`LARGE_HTML_STACK_THRESHOLD_BYTES`] runs on a dedicated thread with
//! a larger stack instead.

use std::any::Any;
use std::thread;

use crate::error::{KreuzbergError, Result};

const LARGE_HTML_STACK_THRESHOLD_BYTES: usize = 512 * 1024;
const HTML_CONVERSION_STACK_SIZE_BYTES: usize = 16 * 1024 * 1024;

/// WASM builds can't spawn threads with custom stack sizes, so oversized HTML
/// is rejected outright rather than risking a stack overflow on the one stack
/// available.
const WASM_MAX_HTML_BYTES: usize = 2 * 1024 * 1024;

pub(crate) fn html_requires_large_stack(len: usize) -> bool {
    len >= LARGE_HTML_STACK_THRESHOLD_BYTES
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn check_wasm_size_limit(html: &str) -> Result<()> {
    if html.len() > WASM_MAX_HTML_BYTES {
        return Err(KreuzbergError::Other(format!(
            "HTML document too large for WASM conversion ({} bytes, max {} bytes)",
            html.len(),
            WASM_MAX_HTML_BYTES
        )));
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn check_wasm_size_limit(_html: &str) -> Result<()> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn run_on_dedicated_stack<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("kreuzberg-html-conversion".to_string())
        .stack_size(HTML_CONVERSION_STACK_SIZE_BYTES)
        .spawn(job)
        .map_err(|err| KreuzbergError::Other(format!("Failed to spawn HTML conversion thread: {}", err)))?;

    match handle.join() {
        Ok(result) => result,
        Err(panic) => {
            let reason = extract_panic_reason(&panic);
            Err(KreuzbergError::Other(format!("HTML conversion panicked: {}", reason)))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn extract_panic_reason(panic: &Box<dyn Any + Send + 'static>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
