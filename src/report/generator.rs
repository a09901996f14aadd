//! Report generation

use crate::analyzer::AnalysisReport;
use crate::catalog::{ApiCatalog, Lookup};
use anyhow::Result;

pub fn generate_markdown_report(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    out.push_str("# Extension Permission Report\n\n");

    // Summary
    out.push_str("## Summary\n\n");
    out.push_str(&format!(
        "- **Extension**: {} v{}\n",
        report.metadata.name, report.metadata.version
    ));
    out.push_str(&format!(
        "- **Manifest Version**: {}\n",
        report.metadata.manifest_version
    ));
    out.push_str(&format!("- **Source Files Scanned**: {}\n", report.files_scanned));
    out.push_str(&format!(
        "- **API Call-Sites Found**: {}\n\n",
        report.profile.total_calls()
    ));

    // Recommendations
    if !report.reconciliation.recommendations.is_empty() {
        out.push_str("## Recommendations\n\n");
        for rec in &report.reconciliation.recommendations {
            out.push_str(&format!("- **[{}]** {}: {}\n", rec.severity, rec.kind, rec.message));
            out.push_str(&format!("  - {}\n", rec.suggestion));
        }
        out.push('\n');
    }

    // Permission reconciliation
    if !report.reconciliation.unused_permissions.is_empty() {
        out.push_str("## Unused Permissions\n\n");
        for p in &report.reconciliation.unused_permissions {
            out.push_str(&format!("- `{}`\n", p));
        }
        out.push('\n');
    }

    if !report.reconciliation.missing_permissions.is_empty() {
        out.push_str("## Missing Permissions\n\n");
        for p in &report.reconciliation.missing_permissions {
            out.push_str(&format!("- `{}`\n", p));
        }
        out.push('\n');
    }

    if !report.reconciliation.unused_hosts.is_empty() {
        out.push_str("## Unused Host Permissions\n\n");
        for h in &report.reconciliation.unused_hosts {
            out.push_str(&format!("- `{}`\n", h));
        }
        out.push('\n');
    }

    if !report.reconciliation.missing_hosts.is_empty() {
        out.push_str("## Missing Host Permissions\n\n");
        for h in &report.reconciliation.missing_hosts {
            out.push_str(&format!("- `{}`\n", h));
        }
        out.push('\n');
    }

    // Per-signature usage listing
    if !report.profile.api_usage.is_empty() {
        out.push_str("## API Usage\n\n");
        out.push_str("| API | Calls | Required Permission |\n");
        out.push_str("|-----|-------|---------------------|\n");
        let catalog = ApiCatalog::global();
        for (signature, count) in &report.profile.api_usage {
            let permission = match catalog.lookup(signature) {
                Lookup::Requires(p) => format!("`{}`", p),
                Lookup::NoPermission => "none".to_string(),
                Lookup::Unknown => "unknown".to_string(),
            };
            out.push_str(&format!("| `{}` | {} | {} |\n", signature, count, permission));
        }
        out.push('\n');
    }

    if !report.profile.host_patterns.is_empty() {
        out.push_str("## Observed Hosts\n\n");
        for h in &report.profile.host_patterns {
            out.push_str(&format!("- `{}`\n", h));
        }
        out.push('\n');
    }

    Ok(out)
}

pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
