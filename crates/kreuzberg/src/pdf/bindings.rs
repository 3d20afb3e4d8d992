//! Lazy Pdfium binding.
//!
//! Binding to the system Pdfium library has a small but real one-time cost
//! (dynamic library load + symbol resolution). Most extraction workloads touch
//! no PDFs at all, so this is deferred until the first PDF actually needs it
//! rather than paid on crate init.

use std::ops::Deref;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use pdfium_render::prelude::*;

use super::error::PdfError;

/// Cached outcome of the first Pdfium bind attempt.
enum InitializationState {
    Uninitialized,
    Initialized,
    Failed(String),
}

static PDFIUM_STATE: Lazy<Mutex<InitializationState>> = Lazy::new(|| Mutex::new(InitializationState::Uninitialized));

/// A bound Pdfium instance ready to load documents.
///
/// Wraps [`Pdfium`] so callers go through [`bind_pdfium`] rather than binding
/// directly, keeping the failure-caching behavior in one place.
pub struct PdfiumHandle(Pdfium);

impl Deref for PdfiumHandle {
    type Target = Pdfium;

    fn deref(&self) -> &Pdfium {
        &self.0
    }
}

/// Bind to the system Pdfium library and return a handle, initializing on first call.
///
/// A prior failure is cached and returned again on every later call rather than
/// retried, since a missing or incompatible system library won't fix itself
/// mid-process.
pub(crate) fn bind_pdfium(map_err: fn(String) -> PdfError, context: &'static str) -> Result<PdfiumHandle, PdfError> {
    {
        let state = PDFIUM_STATE
            .lock()
            .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))?;

        if let InitializationState::Failed(err) = &*state {
            return Err(map_err(format!(
                "Pdfium initialization previously failed ({}): {}",
                context, err
            )));
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            *PDFIUM_STATE
                .lock()
                .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))? =
                InitializationState::Initialized;
            Ok(PdfiumHandle(Pdfium::new(bindings)))
        }
        Err(err) => {
            let message = err.to_string();
            *PDFIUM_STATE
                .lock()
                .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))? =
                InitializationState::Failed(message.clone());
            Err(map_err(format!("Pdfium initialization failed ({}): {}", context, message)))
        }
    }
}
