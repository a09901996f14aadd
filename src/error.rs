//! Typed errors for contract violations in the analysis core

use std::path::PathBuf;
use thiserror::Error;

/// Violations of the core's input contracts. Scanning itself never fails;
/// these surface only when an external collaborator hands the core
/// malformed data.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("source file {0} is not valid UTF-8")]
    NonUtf8Source(PathBuf),

    #[error("unsupported manifest version: {0}")]
    UnsupportedManifestVersion(u8),

    #[error("unknown rule name in config: {0}")]
    UnknownRule(String),

    #[error("invalid severity in config: {0}")]
    InvalidSeverity(String),
}
