//! Extraction entry points: file-based, byte-based, batch, and their sync wrappers.
//!
//! This module wires together MIME detection, extractor selection, the
//! post-extraction pipeline, and (with the `tokio-runtime` feature) concurrent
//! batch processing. [`helpers`] holds the pieces shared across all of them.

mod batch;
mod bytes;
mod file;
mod helpers;
#[cfg(not(feature = "tokio-runtime"))]
mod legacy;
mod sync;

pub use batch::{batch_extract_bytes, batch_extract_file};
pub use bytes::extract_bytes;
pub use file::extract_file;
pub use sync::{batch_extract_bytes_sync, batch_extract_file_sync, extract_bytes_sync, extract_file_sync};
