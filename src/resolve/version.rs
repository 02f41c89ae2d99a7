//! Version tokens and the published version set
//!
//! Tokens are opaque strings with two recognised shapes:
//! - Release: `v1`, `v1.2`, `v1.2.3` (immutable, never editable)
//! - Merge request: `MR-<id>-<branch>` (edits go to `<branch>`)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default version, always published
pub const LATEST: &str = "latest";
/// Path segment that precedes a version token in a URL
pub const VERSIONS_DIRECTORY: &str = "versions";

static RELEASE_RE: OnceLock<Regex> = OnceLock::new();
static MERGE_REQUEST_RE: OnceLock<Regex> = OnceLock::new();

fn release_re() -> &'static Regex {
    RELEASE_RE.get_or_init(|| Regex::new(r"^v(\d+(\.\d+){0,2})$").unwrap())
}

fn merge_request_re() -> &'static Regex {
    MERGE_REQUEST_RE.get_or_init(|| Regex::new(r"MR-\d+-").unwrap())
}

pub fn is_latest(version: &str) -> bool {
    version == LATEST
}

pub fn is_release(version: &str) -> bool {
    release_re().is_match(version)
}

/// Branch embedded in a merge-request token, if it is one
pub fn merge_request_branch(version: &str) -> Option<String> {
    let re = merge_request_re();
    if re.is_match(version) {
        Some(re.replacen(version, 1, "").into_owned())
    } else {
        None
    }
}

// =============================================================================
// VersionKind
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionKind {
    Latest,
    Release,
    MergeRequest { branch: String },
    /// Any other token, treated as a branch name
    Branch,
}

impl VersionKind {
    pub fn classify(version: &str) -> Self {
        if is_latest(version) {
            VersionKind::Latest
        } else if is_release(version) {
            VersionKind::Release
        } else if let Some(branch) = merge_request_branch(version) {
            VersionKind::MergeRequest { branch }
        } else {
            VersionKind::Branch
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, VersionKind::Release)
    }
}

// =============================================================================
// VersionSet
// =============================================================================

/// Published versions of one entity. Always contains `latest`.
///
/// Only membership matters for reconciliation; insertion order is kept so the
/// selector lists `latest` first and then the manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSet {
    versions: Vec<String>,
}

impl Default for VersionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionSet {
    pub fn new() -> Self {
        Self {
            versions: vec![LATEST.to_string()],
        }
    }

    pub fn from_manifest<I, S>(manifest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for entry in manifest {
            set.insert(entry);
        }
        set
    }

    /// Insert a token; empty and duplicate tokens are ignored
    pub fn insert(&mut self, version: impl Into<String>) -> bool {
        let version = version.into();
        if version.is_empty() || self.contains(&version) {
            return false;
        }
        self.versions.push(version);
        true
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(|v| v.as_str())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.versions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_pattern() {
        for v in ["v1", "v1.2", "v1.2.3", "v10.20.30"] {
            assert!(is_release(v), "{} should be a release", v);
        }
        for v in ["version1", "v1.2.3.4", "MR-12-foo", "v", "1.2", "v1.", "latest", "main"] {
            assert!(!is_release(v), "{} should not be a release", v);
        }
    }

    #[test]
    fn test_merge_request_branch() {
        assert_eq!(
            merge_request_branch("MR-42-feature-x").as_deref(),
            Some("feature-x")
        );
        assert_eq!(merge_request_branch("MR-7-fix/MR-8-y").as_deref(), Some("fix/MR-8-y"));
        assert_eq!(merge_request_branch("MR-x-foo"), None);
        assert_eq!(merge_request_branch("feature"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(VersionKind::classify("latest"), VersionKind::Latest);
        assert_eq!(VersionKind::classify("v2.0"), VersionKind::Release);
        assert_eq!(
            VersionKind::classify("MR-1-docs"),
            VersionKind::MergeRequest {
                branch: "docs".into()
            }
        );
        assert_eq!(VersionKind::classify("develop"), VersionKind::Branch);
        assert!(!VersionKind::Release.is_editable());
        assert!(VersionKind::Branch.is_editable());
    }

    #[test]
    fn test_set_always_contains_latest() {
        let set = VersionSet::from_manifest(Vec::<String>::new());
        assert!(set.contains(LATEST));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_dedupes_and_keeps_order() {
        let set = VersionSet::from_manifest(["v1.0", "latest", "develop", "v1.0", ""]);
        assert_eq!(set.to_vec(), vec!["latest", "v1.0", "develop"]);
    }
}
