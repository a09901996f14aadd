//! Analyzer configuration

use super::reconcile::{RecommendationKind, Severity};
use crate::error::AnalyzerError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Configuration loaded from an `extlint.json` file (or built in code).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzerConfig {
    /// Path fragments to exclude while walking an extension directory,
    /// in addition to the built-in `node_modules`/hidden-directory skips.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-recommendation severity overrides, keyed by kind name
    /// (e.g. `"unused-permissions"`).
    #[serde(default)]
    pub rules: HashMap<String, RecommendationRule>,
}

/// A rule entry is either a bare severity string or a structured object.
/// Both shapes normalize into [`RuleSettings`] once at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecommendationRule {
    Simple(String),
    Detailed { severity: Severity },
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the duck-typed rule entries into a normalized severity map.
    /// Unknown kind names and unknown severity strings are rejected here so
    /// the engine never branches on raw config shapes.
    pub fn resolve_rules(&self) -> Result<RuleSettings, AnalyzerError> {
        let mut overrides = BTreeMap::new();

        for (name, rule) in &self.rules {
            let kind = parse_kind(name).ok_or_else(|| AnalyzerError::UnknownRule(name.clone()))?;
            let severity = match rule {
                RecommendationRule::Simple(s) => {
                    parse_severity(s).ok_or_else(|| AnalyzerError::InvalidSeverity(s.clone()))?
                }
                RecommendationRule::Detailed { severity } => *severity,
            };
            overrides.insert(kind, severity);
        }

        Ok(RuleSettings { overrides })
    }
}

/// Normalized rule settings consumed by the reconciler.
#[derive(Debug, Clone, Default)]
pub struct RuleSettings {
    overrides: BTreeMap<RecommendationKind, Severity>,
}

impl RuleSettings {
    /// Severity for a recommendation kind, falling back to its default.
    pub fn severity(&self, kind: RecommendationKind, default: Severity) -> Severity {
        self.overrides.get(&kind).copied().unwrap_or(default)
    }
}

fn parse_kind(name: &str) -> Option<RecommendationKind> {
    match name {
        "unused-permissions" => Some(RecommendationKind::UnusedPermissions),
        "missing-permissions" => Some(RecommendationKind::MissingPermissions),
        "broad-host-permissions" => Some(RecommendationKind::BroadHostPermissions),
        "activeTab-recommended" => Some(RecommendationKind::ActiveTabRecommended),
        _ => None,
    }
}

fn parse_severity(name: &str) -> Option<Severity> {
    match name {
        "info" => Some(Severity::Info),
        "warning" => Some(Severity::Warning),
        "error" => Some(Severity::Error),
        _ => None,
    }
}
