//! Loading an extension-under-test from disk
//!
//! Supplies (path, content) pairs to the analysis core. Directory walks
//! skip `node_modules` and hidden directories; additional exclusion
//! fragments come from [`AnalyzerConfig::exclude`](crate::models::AnalyzerConfig).

use crate::models::Extension;
use crate::parser::manifest::parse_manifest;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Load extension from a directory, `.zip`, or `.crx` package.
pub fn load_extension(path: &Path, excludes: &[String]) -> Result<Extension> {
    if path.is_dir() {
        load_from_directory(path, excludes)
    } else if matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("zip") | Some("crx")
    ) {
        load_from_archive(path, excludes)
    } else {
        anyhow::bail!("Unsupported input format. Expected directory, .zip, or .crx file")
    }
}

fn is_excluded(relative: &Path, excludes: &[String]) -> bool {
    let components: Vec<&str> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    components.iter().any(|c| {
        *c == "node_modules"
            || c.starts_with('.')
            || excludes.iter().any(|e| c == e)
    })
}

/// Load extension from directory
pub fn load_from_directory(dir: &Path, excludes: &[String]) -> Result<Extension> {
    let manifest_path = dir.join("manifest.json");
    let manifest_content = fs::read(&manifest_path).context("Failed to read manifest.json")?;
    let manifest = parse_manifest(&manifest_content)?;

    let mut files = HashMap::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative_path = entry
            .path()
            .strip_prefix(dir)
            .context("Failed to get relative path")?;

        if is_excluded(relative_path, excludes) {
            continue;
        }

        let content = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        files.insert(relative_path.to_path_buf(), content);
    }

    Ok(Extension::new(manifest, files))
}

/// Load extension from a ZIP or CRX archive
pub fn load_from_archive(archive_path: &Path, excludes: &[String]) -> Result<Extension> {
    let file = fs::File::open(archive_path).context("Failed to open archive")?;
    let mut archive = ZipArchive::new(file).context("Failed to read ZIP archive")?;

    let mut files = HashMap::new();
    let mut manifest_content = None;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .context("Failed to read file from archive")?;
        if !entry.is_file() {
            continue;
        }

        let path = PathBuf::from(entry.name());
        if is_excluded(&path, excludes) {
            continue;
        }

        let mut content = Vec::new();
        std::io::copy(&mut entry, &mut content).context("Failed to read file content")?;

        if path.file_name().and_then(|n| n.to_str()) == Some("manifest.json") {
            manifest_content = Some(content.clone());
        }

        files.insert(path, content);
    }

    let manifest = manifest_content
        .ok_or_else(|| anyhow::anyhow!("manifest.json not found in archive"))
        .and_then(|content| parse_manifest(&content))?;

    Ok(Extension::new(manifest, files))
}
