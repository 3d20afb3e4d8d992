//! `pandoc --version` probe, cached for the life of the process.

use std::sync::OnceLock;

use regex::Regex;
use tokio::process::Command;

use crate::error::{KreuzbergError, Result};

/// Minimum supported Pandoc major version.
pub const MINIMUM_PANDOC_VERSION: u32 = 2;

static PANDOC_VERSION: OnceLock<std::result::Result<u32, String>> = OnceLock::new();

/// Confirm `pandoc` is on `PATH` and reports a version `>= MINIMUM_PANDOC_VERSION`.
///
/// The probe result (success or failure message) is cached after the first call so
/// every subsequent Pandoc-routed extraction skips the subprocess spawn.
pub async fn validate_pandoc_version() -> Result<()> {
    if let Some(cached) = PANDOC_VERSION.get() {
        return cached
            .clone()
            .map(|_| ())
            .map_err(|msg| KreuzbergError::missing_dependency("pandoc", msg));
    }

    let probe = probe_version().await;
    let _ = PANDOC_VERSION.set(probe.clone());
    probe.map(|_| ()).map_err(|msg| KreuzbergError::missing_dependency("pandoc", msg))
}

async fn probe_version() -> std::result::Result<u32, String> {
    let output = Command::new("pandoc")
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("pandoc {} or newer is required but not found on PATH: {e}", MINIMUM_PANDOC_VERSION))?;

    if !output.status.success() {
        return Err(format!("pandoc --version exited non-zero: {}", output.status));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let major = extract_major_version(&stdout)
        .ok_or_else(|| format!("could not parse pandoc version from output: {stdout}"))?;

    if major < MINIMUM_PANDOC_VERSION {
        return Err(format!(
            "pandoc {} or newer is required, found major version {major}",
            MINIMUM_PANDOC_VERSION
        ));
    }

    Ok(major)
}

/// Multi-pattern fallback for `pandoc --version` output across distro packagings.
fn extract_major_version(output: &str) -> Option<u32> {
    const PATTERNS: &[&str] = &[
        r"pandoc(?:\.exe)?\s+v?(\d+)\.\d+",
        r"pandoc\s+\(version\s+(\d+)\.\d+",
        r"pandoc-(\d+)\.\d+",
    ];

    for pattern in PATTERNS {
        if let Ok(re) = Regex::new(pattern)
            && let Some(caps) = re.captures(output)
            && let Some(major) = caps.get(1).and_then(|m| m.as_str().parse().ok())
        {
            return Some(major);
        }
    }

    for token in output.split_whitespace() {
        let mut parts = token.split('.');
        if let Some(Ok(major)) = parts.next().map(str::parse) {
            return Some(major);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_version_line_parses() {
        assert_eq!(extract_major_version("pandoc 3.1.2"), Some(3));
    }

    #[test]
    fn parenthesized_version_parses() {
        assert_eq!(extract_major_version("pandoc (version 2.19.2)"), Some(2));
    }

    #[test]
    fn exe_suffix_parses() {
        assert_eq!(extract_major_version("pandoc.exe 3.0"), Some(3));
    }

    #[test]
    fn garbage_output_yields_none() {
        assert_eq!(extract_major_version("not pandoc at all"), None);
    }
}
