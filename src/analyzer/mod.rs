//! Analysis orchestration: scan every source file, aggregate, reconcile

pub mod permissions;
pub mod usage;

use crate::models::{Extension, ExtensionMetadata, ReconciliationResult, RuleSettings, UsageProfile};
use crate::parser::{RegexScanner, SourceScanner};
use anyhow::Result;
use serde::Serialize;

/// Everything one analysis run produced, handed to report renderers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ExtensionMetadata,
    pub files_scanned: usize,
    pub profile: UsageProfile,
    pub reconciliation: ReconciliationResult,
}

/// Analyze an extension with default rule severities.
pub fn analyze_extension(extension: &Extension) -> Result<AnalysisReport> {
    analyze_extension_with(extension, &RuleSettings::default())
}

/// Scan every `.js`/`.ts` file, aggregate the per-file results into a
/// usage profile, and reconcile it against the manifest.
pub fn analyze_extension_with(
    extension: &Extension,
    rules: &RuleSettings,
) -> Result<AnalysisReport> {
    let scanner = RegexScanner::new();
    let mut results = Vec::new();

    for path in extension.get_source_files() {
        if let Some(content) = extension.source_content(&path)? {
            results.push(scanner.scan(&path, &content));
        }
    }

    let profile = usage::aggregate(&results);
    let reconciliation = permissions::reconcile_with(&extension.manifest, &profile, rules);

    Ok(AnalysisReport {
        metadata: extension.metadata.clone(),
        files_scanned: results.len(),
        profile,
        reconciliation,
    })
}
