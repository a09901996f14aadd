//! Permission reconciliation: declared manifest grants vs observed usage

use crate::models::{
    Manifest, Recommendation, RecommendationKind, ReconciliationResult, RuleSettings, Severity,
    UsageProfile,
};
use crate::utils::match_pattern::{
    covered_by_any, declared_is_used, is_broad_pattern, is_match_pattern,
};
use std::collections::BTreeSet;

/// Reconcile with default rule severities.
pub fn reconcile(manifest: &Manifest, profile: &UsageProfile) -> ReconciliationResult {
    reconcile_with(manifest, profile, &RuleSettings::default())
}

/// Reconcile a declared manifest against an observed usage profile.
///
/// Pure function: same manifest and profile always produce the same
/// result. `rules` only adjusts recommendation severities, never the set
/// contents.
pub fn reconcile_with(
    manifest: &Manifest,
    profile: &UsageProfile,
    rules: &RuleSettings,
) -> ReconciliationResult {
    // MV2 manifests put host patterns into `permissions`; split the two
    // populations before comparing anything.
    let declared_permissions: BTreeSet<String> = manifest
        .permissions
        .iter()
        .chain(manifest.optional_permissions.iter())
        .filter(|p| !is_match_pattern(p))
        .cloned()
        .collect();

    let declared_hosts: BTreeSet<String> = manifest
        .host_permissions
        .iter()
        .chain(manifest.permissions.iter().filter(|p| is_match_pattern(p)))
        .cloned()
        .collect();

    let unused_permissions: Vec<String> = declared_permissions
        .iter()
        .filter(|p| !profile.permissions.contains(*p))
        .cloned()
        .collect();

    let missing_permissions: Vec<String> = profile
        .permissions
        .iter()
        .filter(|p| !declared_permissions.contains(*p))
        .cloned()
        .collect();

    let unused_hosts: Vec<String> = declared_hosts
        .iter()
        .filter(|h| !declared_is_used(h, &profile.host_patterns))
        .cloned()
        .collect();

    let missing_hosts: Vec<String> = profile
        .host_patterns
        .iter()
        .filter(|h| !covered_by_any(h, &declared_hosts))
        .cloned()
        .collect();

    let mut recommendations = Vec::new();

    if !unused_permissions.is_empty() {
        recommendations.push(Recommendation::new(
            RecommendationKind::UnusedPermissions,
            rules.severity(RecommendationKind::UnusedPermissions, Severity::Warning),
            format!(
                "Declared permissions never exercised by any scanned source: {}",
                unused_permissions.join(", ")
            ),
            "Remove them from \"permissions\" to shrink the install-time warning surface",
        ));
    }

    if !missing_permissions.is_empty() {
        recommendations.push(Recommendation::new(
            RecommendationKind::MissingPermissions,
            rules.severity(RecommendationKind::MissingPermissions, Severity::Error),
            format!(
                "API calls require permissions the manifest does not declare: {}",
                missing_permissions.join(", ")
            ),
            "Add them to \"permissions\" in manifest.json or the calls will fail at runtime",
        ));
    }

    if unused_hosts.iter().any(|h| is_broad_pattern(h)) {
        recommendations.push(Recommendation::new(
            RecommendationKind::BroadHostPermissions,
            rules.severity(RecommendationKind::BroadHostPermissions, Severity::Warning),
            "A blanket host permission is declared but no network call was observed",
            "Replace <all_urls>-style grants with the specific origins the extension contacts",
        ));
    }

    if profile.needs_active_tab && !declared_permissions.contains("activeTab") {
        recommendations.push(Recommendation::new(
            RecommendationKind::ActiveTabRecommended,
            rules.severity(RecommendationKind::ActiveTabRecommended, Severity::Info),
            "Tab-scoped injection calls detected; activeTab may cover them",
            "Declaring \"activeTab\" can replace broad host permissions for user-gesture flows",
        ));
    }

    ReconciliationResult {
        unused_permissions,
        missing_permissions,
        unused_hosts,
        missing_hosts,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Manifest;
    use pretty_assertions::assert_eq;

    fn manifest_with(
        permissions: &[&str],
        optional: &[&str],
        hosts: &[&str],
    ) -> Manifest {
        let mut manifest = Manifest::empty("Test", "1.0");
        manifest.permissions = permissions.iter().map(|s| s.to_string()).collect();
        manifest.optional_permissions = optional.iter().map(|s| s.to_string()).collect();
        manifest.host_permissions = hosts.iter().map(|s| s.to_string()).collect();
        manifest
    }

    fn profile_with(permissions: &[&str], hosts: &[&str], needs_active_tab: bool) -> UsageProfile {
        UsageProfile {
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
            host_patterns: hosts.iter().map(|s| s.to_string()).collect(),
            api_usage: Default::default(),
            needs_active_tab,
        }
    }

    #[test]
    fn test_unused_permission_reported() {
        let manifest = manifest_with(&["tabs"], &[], &[]);
        let profile = profile_with(&[], &[], false);

        let result = reconcile(&manifest, &profile);
        assert_eq!(result.unused_permissions, vec!["tabs"]);
        assert!(result.missing_permissions.is_empty());
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(
            result.recommendations[0].kind,
            RecommendationKind::UnusedPermissions
        );
        assert_eq!(result.recommendations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_missing_permission_is_error() {
        let manifest = manifest_with(&[], &[], &[]);
        let profile = profile_with(&["cookies"], &[], false);

        let result = reconcile(&manifest, &profile);
        assert_eq!(result.missing_permissions, vec!["cookies"]);
        assert!(result.has_errors());
    }

    #[test]
    fn test_optional_permissions_count_as_declared() {
        let manifest = manifest_with(&[], &["cookies"], &[]);
        let profile = profile_with(&["cookies"], &[], false);

        let result = reconcile(&manifest, &profile);
        assert!(result.missing_permissions.is_empty());
        // Used, so not unused either.
        assert!(result.unused_permissions.is_empty());
    }

    #[test]
    fn test_matching_host_is_neither_unused_nor_missing() {
        let manifest = manifest_with(&[], &[], &["https://api.example.com/*"]);
        let profile = profile_with(&[], &["https://api.example.com/*"], false);

        let result = reconcile(&manifest, &profile);
        assert!(result.unused_hosts.is_empty());
        assert!(result.missing_hosts.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_broad_grant_justified_by_any_usage() {
        let manifest = manifest_with(&[], &[], &["<all_urls>"]);
        let profile = profile_with(&[], &["https://x.com/*"], false);

        let result = reconcile(&manifest, &profile);
        assert!(result.unused_hosts.is_empty());
        // No broad-host recommendation since unused_hosts is empty.
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.kind != RecommendationKind::BroadHostPermissions));
    }

    #[test]
    fn test_broad_grant_without_any_usage_flagged() {
        let manifest = manifest_with(&[], &[], &["<all_urls>"]);
        let profile = profile_with(&[], &[], false);

        let result = reconcile(&manifest, &profile);
        assert_eq!(result.unused_hosts, vec!["<all_urls>"]);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.kind == RecommendationKind::BroadHostPermissions));
    }

    #[test]
    fn test_mv2_host_pattern_in_permissions_treated_as_host() {
        let manifest = manifest_with(&["storage", "https://api.example.com/*"], &[], &[]);
        let profile = profile_with(&["storage"], &["https://api.example.com/*"], false);

        let result = reconcile(&manifest, &profile);
        assert!(result.unused_permissions.is_empty());
        assert!(result.unused_hosts.is_empty());
        assert!(result.missing_hosts.is_empty());
    }

    #[test]
    fn test_active_tab_recommended_when_not_declared() {
        let manifest = manifest_with(&[], &[], &[]);
        let profile = profile_with(&[], &[], true);

        let result = reconcile(&manifest, &profile);
        let rec = result
            .recommendations
            .iter()
            .find(|r| r.kind == RecommendationKind::ActiveTabRecommended)
            .expect("activeTab recommendation");
        assert_eq!(rec.severity, Severity::Info);
    }

    #[test]
    fn test_active_tab_not_recommended_when_declared() {
        let manifest = manifest_with(&["activeTab"], &[], &[]);
        let profile = profile_with(&[], &[], true);

        let result = reconcile(&manifest, &profile);
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.kind != RecommendationKind::ActiveTabRecommended));
    }

    #[test]
    fn test_set_difference_laws() {
        let manifest = manifest_with(&["storage", "tabs"], &["downloads"], &[]);
        let profile = profile_with(&["storage", "cookies"], &[], false);

        let result = reconcile(&manifest, &profile);

        // unusedPermissions ∩ profile.permissions = ∅
        assert!(result
            .unused_permissions
            .iter()
            .all(|p| !profile.permissions.contains(p)));
        // missingPermissions ∩ declaredPermissions = ∅
        let declared: Vec<&str> = vec!["storage", "tabs", "downloads"];
        assert!(result
            .missing_permissions
            .iter()
            .all(|p| !declared.contains(&p.as_str())));
        // The three parts partition declared ∪ observed without overlap.
        let shared: Vec<String> = declared
            .iter()
            .filter(|p| profile.permissions.contains(**p))
            .map(|p| p.to_string())
            .collect();
        let mut union: Vec<String> = result
            .unused_permissions
            .iter()
            .chain(shared.iter())
            .chain(result.missing_permissions.iter())
            .cloned()
            .collect();
        union.sort();
        let mut expected: Vec<String> = declared
            .iter()
            .map(|p| p.to_string())
            .chain(profile.permissions.iter().cloned())
            .collect();
        expected.sort();
        expected.dedup();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let manifest = manifest_with(&["storage", "tabs"], &[], &["<all_urls>"]);
        let profile = profile_with(&["cookies"], &["https://x.com/*"], true);

        assert_eq!(
            reconcile(&manifest, &profile),
            reconcile(&manifest, &profile)
        );
    }

    #[test]
    fn test_rule_override_changes_severity_only() {
        use crate::models::AnalyzerConfig;

        let manifest = manifest_with(&["tabs"], &[], &[]);
        let profile = profile_with(&[], &[], false);

        let config: AnalyzerConfig =
            serde_json::from_str(r#"{ "rules": { "unused-permissions": "error" } }"#).unwrap();
        let rules = config.resolve_rules().unwrap();

        let default = reconcile(&manifest, &profile);
        let overridden = reconcile_with(&manifest, &profile, &rules);

        assert_eq!(default.unused_permissions, overridden.unused_permissions);
        assert_eq!(overridden.recommendations[0].severity, Severity::Error);
        assert_eq!(default.recommendations[0].severity, Severity::Warning);
    }
}
