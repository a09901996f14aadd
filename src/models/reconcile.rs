//! Reconciliation output: set differences and recommendations

use serde::{Deserialize, Serialize};

/// Result of reconciling a declared manifest against an observed
/// [`UsageProfile`](super::usage::UsageProfile). Recomputed fresh on every
/// call; all vectors are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub unused_permissions: Vec<String>,
    pub missing_permissions: Vec<String>,
    pub unused_hosts: Vec<String>,
    pub missing_hosts: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl ReconciliationResult {
    pub fn is_clean(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.recommendations
            .iter()
            .any(|r| r.severity == Severity::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationKind {
    UnusedPermissions,
    MissingPermissions,
    BroadHostPermissions,
    ActiveTabRecommended,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::UnusedPermissions => write!(f, "unused-permissions"),
            RecommendationKind::MissingPermissions => write!(f, "missing-permissions"),
            RecommendationKind::BroadHostPermissions => write!(f, "broad-host-permissions"),
            RecommendationKind::ActiveTabRecommended => write!(f, "activeTab-recommended"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}
