//! Report rendering for analysis results

pub mod generator;

use crate::analyzer::AnalysisReport;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

pub fn generate_report(report: &AnalysisReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => generator::generate_markdown_report(report),
        ReportFormat::Json => generator::generate_json_report(report),
    }
}
