//! Host-permission pattern matching
//!
//! Decides whether a declared host pattern covers an observed host and,
//! in the reverse direction, whether a declared pattern is justified by
//! anything the code was observed contacting. Matching is case-sensitive
//! and performs no normalization beyond the `scheme://host/*` convention
//! established at extraction time.

use regex::Regex;
use std::collections::BTreeSet;

pub const ALL_URLS: &str = "<all_urls>";
pub const WILDCARD_ALL: &str = "*://*/*";

/// `<all_urls>` and `*://*/*` grant access to every origin.
pub fn is_broad_pattern(pattern: &str) -> bool {
    pattern == ALL_URLS || pattern == WILDCARD_ALL
}

/// True if a string looks like a host match pattern rather than an API
/// permission name. MV2 manifests mix both into `permissions`.
pub fn is_match_pattern(s: &str) -> bool {
    s.contains("://") || s.starts_with('<') || s.starts_with('*')
}

/// Does `declared` cover `observed`? Globs expand `*` to any run of
/// characters and `?` to a single character, anchored as a full match.
pub fn pattern_covers(declared: &str, observed: &str) -> bool {
    if is_broad_pattern(declared) {
        return true;
    }
    match glob_to_regex(declared) {
        Ok(re) => re.is_match(observed),
        Err(_) => false,
    }
}

/// Is `observed` covered by at least one declared pattern?
pub fn covered_by_any<'a>(
    observed: &str,
    declared: impl IntoIterator<Item = &'a String>,
) -> bool {
    declared.into_iter().any(|d| pattern_covers(d, observed))
}

/// Is a declared pattern justified by the observed usage set?
///
/// A broad grant counts as used whenever any concrete host usage exists at
/// all. This deliberately under-reports "unused broad permission" rather
/// than over-reporting it.
pub fn declared_is_used(declared: &str, used: &BTreeSet<String>) -> bool {
    if is_broad_pattern(declared) {
        return !used.is_empty();
    }
    used.iter().any(|u| pattern_covers(declared, u))
}

fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(glob)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    Regex::new(&format!("^{escaped}$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://x.com/*"; "concrete host")]
    #[test_case("*://*.example.org/*"; "wildcard subdomain")]
    #[test_case("http://tracker.example.org/*"; "plain http")]
    fn test_all_urls_covers_everything(observed: &str) {
        assert!(pattern_covers(ALL_URLS, observed));
        assert!(pattern_covers(WILDCARD_ALL, observed));
    }

    #[test_case("https://api.example.com/*", "https://api.example.com/*", true; "exact")]
    #[test_case("https://*.example.com/*", "https://api.example.com/*", true; "subdomain wildcard")]
    #[test_case("*://api.example.com/*", "https://api.example.com/*", true; "scheme wildcard")]
    #[test_case("https://api.example.com/*", "https://other.example.com/*", false; "different host")]
    #[test_case("https://api.example.com/*", "http://api.example.com/*", false; "different scheme")]
    fn test_pattern_covers(declared: &str, observed: &str, expected: bool) {
        assert_eq!(pattern_covers(declared, observed), expected);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!pattern_covers(
            "https://API.example.com/*",
            "https://api.example.com/*"
        ));
    }

    #[test]
    fn test_dots_are_literal() {
        // The dot in the declared host must not match arbitrary characters.
        assert!(!pattern_covers(
            "https://api.example.com/*",
            "https://apixexample.com/*"
        ));
    }

    #[test]
    fn test_broad_grant_used_iff_any_usage() {
        let empty = BTreeSet::new();
        let used: BTreeSet<String> = ["https://x.com/*".to_string()].into_iter().collect();

        assert!(!declared_is_used(ALL_URLS, &empty));
        assert!(declared_is_used(ALL_URLS, &used));
        assert!(declared_is_used(WILDCARD_ALL, &used));
    }

    #[test]
    fn test_concrete_declared_needs_covering_usage() {
        let used: BTreeSet<String> = ["https://x.com/*".to_string()].into_iter().collect();
        assert!(!declared_is_used("https://api.example.com/*", &used));
        assert!(declared_is_used("https://x.com/*", &used));
    }

    #[test]
    fn test_is_match_pattern() {
        assert!(is_match_pattern("https://example.com/*"));
        assert!(is_match_pattern("<all_urls>"));
        assert!(is_match_pattern("*://*.example.com/*"));
        assert!(!is_match_pattern("storage"));
        assert!(!is_match_pattern("tabs"));
    }
}
