//! File I/O helpers shared by the file-based extraction entry points.

use std::path::Path;

use crate::{KreuzbergError, Result};

/// Check whether a file exists.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Validate that a file exists, returning a `KreuzbergError::Validation` otherwise.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    if !file_exists(&path) {
        return Err(KreuzbergError::validation(format!(
            "File does not exist: {}",
            path.as_ref().display()
        )));
    }
    Ok(())
}
