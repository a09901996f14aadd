//! Browser Extension Permission Analyzer
//!
//! A library for statically reconciling the permissions a browser
//! extension declares against the permissions its source code actually
//! exercises. Scans `.js`/`.ts` files for API call-sites and literal
//! network URLs, derives the observed permission/host footprint, and
//! reports over-privilege and under-privilege with actionable
//! recommendations.

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod models;
pub mod parser;
pub mod report;
pub mod utils;

pub use analyzer::{analyze_extension, AnalysisReport};
pub use catalog::{ApiCatalog, Lookup};
pub use error::AnalyzerError;
pub use models::{
    AnalyzerConfig, Extension, Manifest, Recommendation, RecommendationKind, ReconciliationResult,
    Severity, UsageProfile,
};

use anyhow::Result;
use std::path::Path;

/// Main entry point: load an extension from disk and analyze it.
pub fn analyze_path(input: &Path, config: &AnalyzerConfig) -> Result<AnalysisReport> {
    // 1. Load extension (directory, .zip, or .crx)
    let extension = loader::load_extension(input, &config.exclude)?;

    // 2. Normalize rule config once, up front
    let rules = config.resolve_rules()?;

    // 3. Scan, aggregate, reconcile
    analyzer::analyze_extension_with(&extension, &rules)
}
