//! Observed-usage data: per-file scan results and the aggregated profile

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// One cataloged API signature observed in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteFinding {
    pub file: PathBuf,
    /// Namespace-less signature, e.g. `tabs.query`.
    pub signature: String,
    /// Number of call-shape matches in the file text. Always >= 1.
    pub count: u32,
}

/// A host-permission pattern derived from a literal URL in network-call
/// code, normalized to `scheme://host/*`. Path granularity is deliberately
/// discarded: intra-domain paths do not change the required grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAccessFinding {
    pub file: PathBuf,
    pub host_pattern: String,
}

/// Everything one scan pass over a single file produced.
#[derive(Debug, Clone, Default)]
pub struct FileScanResult {
    pub file: PathBuf,
    pub calls: Vec<CallSiteFinding>,
    pub hosts: Vec<HostAccessFinding>,
    pub needs_active_tab: bool,
}

/// The observed-usage profile of a whole extension.
///
/// `permissions` is derived from `api_usage` through the API catalog; it is
/// a cache of that derivation, never independent state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageProfile {
    pub permissions: BTreeSet<String>,
    pub host_patterns: BTreeSet<String>,
    pub api_usage: BTreeMap<String, u32>,
    pub needs_active_tab: bool,
}

impl UsageProfile {
    pub fn is_empty(&self) -> bool {
        self.api_usage.is_empty() && self.host_patterns.is_empty() && !self.needs_active_tab
    }

    /// Total call-site matches across all signatures.
    pub fn total_calls(&self) -> u32 {
        self.api_usage.values().sum()
    }
}
