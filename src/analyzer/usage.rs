//! Aggregation of per-file scan results into a usage profile

use crate::catalog::{ApiCatalog, Lookup};
use crate::models::{FileScanResult, UsageProfile};

/// Merge per-file scan results into one [`UsageProfile`].
///
/// Pure reduction: occurrence counts sum, host patterns union, the
/// activeTab signal ORs. `permissions` is derived from the summed usage
/// through the API catalog, so the result is independent of file order
/// and idempotent over identical inputs.
pub fn aggregate(results: &[FileScanResult]) -> UsageProfile {
    let mut profile = UsageProfile::default();

    for result in results {
        for call in &result.calls {
            *profile.api_usage.entry(call.signature.clone()).or_insert(0) += call.count;
        }
        for host in &result.hosts {
            profile.host_patterns.insert(host.host_pattern.clone());
        }
        profile.needs_active_tab |= result.needs_active_tab;
    }

    let catalog = ApiCatalog::global();
    for signature in profile.api_usage.keys() {
        if let Lookup::Requires(permission) = catalog.lookup(signature) {
            profile.permissions.insert(permission.to_string());
        }
    }

    profile
}
