//! OCR subsystem: the Tesseract subprocess backend and its supporting types.
//!
//! Every backend runs as an external process (never FFI, never in-process model weights) so a
//! crash or a runaway page never brings down the host. See [`tesseract_backend::TesseractBackend`].

pub mod error;
pub mod table;
pub mod types;
pub mod validation;

#[cfg(feature = "ocr")]
pub mod tesseract_backend;

pub use error::OcrError;
pub use types::{BatchItemResult, HocrWord};
