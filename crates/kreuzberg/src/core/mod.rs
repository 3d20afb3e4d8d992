//! Core extraction machinery: configuration, MIME detection, the extraction
//! entry points, and the post-extraction pipeline that every extractor's
//! result passes through.

pub mod batch_mode;
pub mod config;
pub mod extractor;
pub mod io;
pub mod mime;
pub mod pipeline;

pub use extractor::{
    batch_extract_bytes, batch_extract_bytes_sync, batch_extract_file, batch_extract_file_sync, extract_bytes,
    extract_bytes_sync, extract_file, extract_file_sync,
};
pub use mime::{detect_mime_type, detect_mime_type_from_bytes, detect_or_validate, validate_mime_type};
pub use pipeline::apply_output_format;
