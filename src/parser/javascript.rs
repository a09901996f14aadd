//! Source scanning for API call-sites using regex patterns
//!
//! Patterns run over raw file text, including comments and string
//! literals, so matches inside either produce false positives. The
//! [`SourceScanner`] trait keeps the seam: an AST-based scanner can
//! replace [`RegexScanner`] without touching the aggregation or
//! reconciliation layers.

use crate::catalog::{ApiCatalog, CatalogEntry};
use crate::models::{CallSiteFinding, FileScanResult, HostAccessFinding};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use url::Url;

/// Scans one file's text for observed API usage.
pub trait SourceScanner {
    fn scan(&self, file: &Path, content: &str) -> FileScanResult;
}

lazy_static! {
    /// One call-shape pattern per catalog entry: the signature under the
    /// chrome or browser namespace, followed by an opening parenthesis.
    static ref CALL_PATTERNS: Vec<(CatalogEntry, Regex)> = ApiCatalog::global()
        .entries()
        .map(|entry| {
            let pattern = format!(
                r"\b(?:chrome|browser)\.{}\s*\(",
                regex::escape(entry.signature)
            );
            (entry, Regex::new(&pattern).unwrap())
        })
        .collect();

    /// Network-call shapes carrying a literal URL. Capture group 1 is the
    /// URL text.
    static ref HOST_PATTERNS: Vec<Regex> = vec![
        // fetch("https://...")
        Regex::new(r#"\bfetch\s*\(\s*["'`](https?://[^"'`\s)]+)"#).unwrap(),
        // xhr.open("GET", "https://...")
        Regex::new(r#"\.open\s*\(\s*["'][A-Za-z]+["']\s*,\s*["'`](https?://[^"'`\s)]+)"#).unwrap(),
        // $.ajax({ url: "https://..." })
        Regex::new(r#"(?s)\$\.ajax\s*\(\s*\{[^}]*?\burl\s*:\s*["'`](https?://[^"'`\s)]+)"#).unwrap(),
        // axios.get("https://...")
        Regex::new(
            r#"\baxios\s*\.\s*(?:get|post|put|delete|patch|head|request)\s*\(\s*["'`](https?://[^"'`\s)]+)"#
        ).unwrap(),
    ];

    /// Call shapes whose host access is satisfiable by the activeTab
    /// permission. Advisory only: matching one says "compatible with
    /// activeTab", never "needs nothing more".
    static ref ACTIVE_TAB_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b(?:chrome|browser)\.scripting\.executeScript\s*\(\s*\{").unwrap(),
        Regex::new(r"\b(?:chrome|browser)\.tabs\.executeScript\s*\(\s*\{").unwrap(),
        Regex::new(r"\b(?:chrome|browser)\.tabs\.sendMessage\s*\(").unwrap(),
        Regex::new(r"\b(?:chrome|browser)\.tabs\.captureVisibleTab\s*\(").unwrap(),
    ];
}

/// Regex-based [`SourceScanner`]. Stateless; scanning never fails, since
/// a pattern either matches or it doesn't.
#[derive(Debug, Default)]
pub struct RegexScanner;

impl RegexScanner {
    pub fn new() -> Self {
        Self
    }
}

impl SourceScanner for RegexScanner {
    fn scan(&self, file: &Path, content: &str) -> FileScanResult {
        let mut result = FileScanResult {
            file: file.to_path_buf(),
            ..Default::default()
        };

        for (entry, pattern) in CALL_PATTERNS.iter() {
            let count = pattern.find_iter(content).count() as u32;
            if count > 0 {
                result.calls.push(CallSiteFinding {
                    file: file.to_path_buf(),
                    signature: entry.signature.to_string(),
                    count,
                });
            }
        }

        for pattern in HOST_PATTERNS.iter() {
            for cap in pattern.captures_iter(content) {
                // Malformed URLs yield no finding, not an error.
                if let Some(host_pattern) = normalize_host_pattern(&cap[1]) {
                    result.hosts.push(HostAccessFinding {
                        file: file.to_path_buf(),
                        host_pattern,
                    });
                }
            }
        }

        result.needs_active_tab = ACTIVE_TAB_PATTERNS.iter().any(|p| p.is_match(content));

        result
    }
}

/// Normalize a literal URL to domain-level granularity:
/// `scheme://host/*`. Paths are discarded since intra-domain path
/// differences do not change the required host permission.
pub fn normalize_host_pattern(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{}/*", parsed.scheme(), host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scan(content: &str) -> FileScanResult {
        RegexScanner::new().scan(&PathBuf::from("test.js"), content)
    }

    fn count_of(result: &FileScanResult, signature: &str) -> u32 {
        result
            .calls
            .iter()
            .find(|c| c.signature == signature)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    #[test]
    fn test_counts_repeated_calls() {
        let code = r#"
            chrome.cookies.get({ name: "a" });
            chrome.cookies.get({ name: "b" });
            browser.cookies.getAll({});
        "#;
        let result = scan(code);
        assert_eq!(count_of(&result, "cookies.get"), 2);
        assert_eq!(count_of(&result, "cookies.getAll"), 1);
    }

    #[test]
    fn test_whitespace_before_paren() {
        let result = scan("chrome.tabs.query   ({ active: true });");
        assert_eq!(count_of(&result, "tabs.query"), 1);
    }

    #[test]
    fn test_uncataloged_api_ignored() {
        let result = scan("chrome.fantasy.doThing();");
        assert!(result.calls.is_empty());
    }

    #[test]
    fn test_fetch_url_normalized_to_host() {
        let result = scan(r#"fetch("https://api.example.com/v1/data?q=1");"#);
        assert_eq!(result.hosts.len(), 1);
        assert_eq!(result.hosts[0].host_pattern, "https://api.example.com/*");
    }

    #[test]
    fn test_xhr_open_url_extracted() {
        let result = scan(r#"xhr.open("POST", "http://tracker.example.org/hit");"#);
        assert_eq!(result.hosts[0].host_pattern, "http://tracker.example.org/*");
    }

    #[test]
    fn test_ajax_url_extracted_across_lines() {
        let code = "$.ajax({\n  method: 'GET',\n  url: 'https://cdn.example.net/lib.js'\n});";
        let result = scan(code);
        assert_eq!(result.hosts[0].host_pattern, "https://cdn.example.net/*");
    }

    #[test]
    fn test_axios_url_extracted() {
        let result = scan(r#"axios.post("https://api.example.com/submit", body);"#);
        assert_eq!(result.hosts[0].host_pattern, "https://api.example.com/*");
    }

    #[test]
    fn test_malformed_url_dropped() {
        // No host at all: the capture itself fails.
        let result = scan(r#"fetch("http://");"#);
        assert!(result.hosts.is_empty());

        // Captured but unparseable: dropped at normalization.
        let result = scan(r#"fetch("https://[bad/path");"#);
        assert!(result.hosts.is_empty());
    }

    #[test]
    fn test_relative_fetch_ignored() {
        let result = scan(r#"fetch("/api/local");"#);
        assert!(result.hosts.is_empty());
    }

    #[test]
    fn test_active_tab_signal() {
        let result = scan("chrome.scripting.executeScript({ target: { tabId }, func: () => {} });");
        assert!(result.needs_active_tab);

        let result = scan("browser.tabs.sendMessage(tabId, { ping: true });");
        assert!(result.needs_active_tab);

        let result = scan("chrome.storage.local.get('key');");
        assert!(!result.needs_active_tab);
    }

    #[test]
    fn test_scan_is_total_on_arbitrary_text() {
        // Binary-ish noise and unterminated syntax must not panic.
        let result = scan("chrome.cookies.get( \u{0} \\x00 «» fetch(\"ht");
        assert_eq!(count_of(&result, "cookies.get"), 1);
    }
}
