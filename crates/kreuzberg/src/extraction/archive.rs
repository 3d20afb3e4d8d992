//! Archive listing and text-content extraction (ZIP, TAR, 7Z).
//!
//! Only files with a recognized text extension are read back as content; the
//! rest are listed in metadata but not decoded.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use sevenz_rust2::{ArchiveReader, Password};
use tar::Archive as TarArchive;
use zip::ZipArchive;

use crate::error::{KreuzbergError, Result};
use crate::types::ArchiveMetadata;

const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".json", ".xml", ".html", ".csv", ".log", ".yaml", ".yml", ".toml",
];

fn is_text_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    TEXT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Lists a ZIP archive's entries without decoding any content.
pub fn extract_zip_metadata(bytes: &[u8]) -> Result<ArchiveMetadata> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| KreuzbergError::parsing(format!("Failed to read ZIP archive: {}", e)))?;

    let mut file_list = Vec::new();
    let mut total_size = 0usize;
    let mut compressed_size = 0usize;

    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| KreuzbergError::parsing(format!("Failed to read ZIP entry: {}", e)))?;

        if !file.is_dir() {
            total_size += file.size() as usize;
        }
        compressed_size += file.compressed_size() as usize;
        file_list.push(file.name().to_string());
    }

    Ok(ArchiveMetadata {
        format: "ZIP".into(),
        file_count: file_list.len(),
        file_list,
        total_size,
        compressed_size: Some(compressed_size),
    })
}

/// Lists a TAR archive's entries without decoding any content.
pub fn extract_tar_metadata(bytes: &[u8]) -> Result<ArchiveMetadata> {
    let mut archive = TarArchive::new(Cursor::new(bytes));

    let mut file_list = Vec::new();
    let mut total_size = 0usize;

    let entries = archive
        .entries()
        .map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR archive: {}", e)))?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR entry: {}", e)))?;
        let path = entry
            .path()
            .map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR entry path: {}", e)))?
            .to_string_lossy()
            .to_string();

        if !entry.header().entry_type().is_dir() {
            total_size += entry.size() as usize;
        }
        file_list.push(path);
    }

    Ok(ArchiveMetadata {
        format: "TAR".into(),
        file_count: file_list.len(),
        file_list,
        total_size,
        compressed_size: None,
    })
}

/// Lists a 7z archive's entries without decoding any content.
pub fn extract_7z_metadata(bytes: &[u8]) -> Result<ArchiveMetadata> {
    let archive = ArchiveReader::new(Cursor::new(bytes), Password::empty())
        .map_err(|e| KreuzbergError::parsing(format!("Failed to read 7z archive: {}", e)))?;

    let mut file_list = Vec::new();
    let mut total_size = 0usize;

    for entry in &archive.archive().files {
        if !entry.is_directory() {
            total_size += entry.size() as usize;
        }
        file_list.push(entry.name().to_string());
    }

    Ok(ArchiveMetadata {
        format: "7Z".into(),
        file_count: file_list.len(),
        file_list,
        total_size,
        compressed_size: None,
    })
}

/// Reads back the content of every text-extension file in a ZIP archive.
pub fn extract_zip_text_content(bytes: &[u8]) -> Result<HashMap<String, String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| KreuzbergError::parsing(format!("Failed to read ZIP archive: {}", e)))?;

    let mut contents = HashMap::new();
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| KreuzbergError::parsing(format!("Failed to read ZIP entry: {}", e)))?;
        let path = file.name().to_string();

        if !file.is_dir() && is_text_path(&path) {
            let mut content = String::new();
            if file.read_to_string(&mut content).is_ok() {
                contents.insert(path, content);
            }
        }
    }

    Ok(contents)
}

/// Reads back the content of every text-extension file in a TAR archive.
pub fn extract_tar_text_content(bytes: &[u8]) -> Result<HashMap<String, String>> {
    let mut archive = TarArchive::new(Cursor::new(bytes));

    let mut contents = HashMap::new();
    let entries = archive
        .entries()
        .map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR archive: {}", e)))?;

    for entry_result in entries {
        let mut entry = entry_result.map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR entry: {}", e)))?;
        let path = entry
            .path()
            .map_err(|e| KreuzbergError::parsing(format!("Failed to read TAR entry path: {}", e)))?
            .to_string_lossy()
            .to_string();

        if !entry.header().entry_type().is_dir() && is_text_path(&path) {
            let mut content = String::new();
            if entry.read_to_string(&mut content).is_ok() {
                contents.insert(path, content);
            }
        }
    }

    Ok(contents)
}

/// Reads back the content of every text-extension file in a 7z archive.
pub fn extract_7z_text_content(bytes: &[u8]) -> Result<HashMap<String, String>> {
    let mut archive = ArchiveReader::new(Cursor::new(bytes), Password::empty())
        .map_err(|e| KreuzbergError::parsing(format!("Failed to read 7z archive: {}", e)))?;

    let mut contents = HashMap::new();
    archive
        .for_each_entries(|entry, reader| {
            let path = entry.name().to_string();
            if !entry.is_directory() && is_text_path(&path) {
                let mut content = Vec::new();
                if reader.read_to_end(&mut content).is_ok()
                    && let Ok(text) = String::from_utf8(content)
                {
                    contents.insert(path, text);
                }
            }
            Ok(true)
        })
        .map_err(|e| KreuzbergError::parsing(format!("Failed to read 7z entries: {}", e)))?;

    Ok(contents)
}
