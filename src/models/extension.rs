//! Extension representation and metadata

use super::manifest::Manifest;
use crate::error::AnalyzerError;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Extension {
    pub manifest: Manifest,
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub metadata: ExtensionMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtensionMetadata {
    pub name: String,
    pub version: String,
    pub manifest_version: u8,
    pub size_bytes: usize,
    pub file_count: usize,
    pub source_file_count: usize,
}

const SOURCE_EXTENSIONS: &[&str] = &["js", "ts"];

fn is_source_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

impl Extension {
    pub fn new(manifest: Manifest, files: HashMap<PathBuf, Vec<u8>>) -> Self {
        let size_bytes = files.values().map(|v| v.len()).sum();
        let file_count = files.len();
        let source_file_count = files.keys().filter(|p| is_source_path(p)).count();

        let metadata = ExtensionMetadata {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            manifest_version: manifest.manifest_version,
            size_bytes,
            file_count,
            source_file_count,
        };

        Self {
            manifest,
            files,
            metadata,
        }
    }

    /// All `.js`/`.ts` files in the extension, sorted for deterministic
    /// iteration order.
    pub fn get_source_files(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| is_source_path(p))
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    /// Source file content as text. Non-UTF-8 content is a contract
    /// violation by the file supplier and fails with a typed error.
    pub fn source_content(&self, path: &Path) -> Result<Option<String>, AnalyzerError> {
        match self.files.get(path) {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes.clone())
                .map(Some)
                .map_err(|_| AnalyzerError::NonUtf8Source(path.to_path_buf())),
        }
    }
}
