//! Reconciler: URL version vs published versions vs remembered version
//!
//! Evaluated in order:
//! 1. URL names a published version (not `latest`) → remember it, stay.
//! 2. URL is `latest` and a published, non-`latest` version is remembered →
//!    redirect to the remembered version.
//! 3. Otherwise the URL version stands.
//!
//! The remembered version is only read in case 2.

use serde::Serialize;

use crate::resolve::{is_latest, VersionSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "version", rename_all = "camelCase")]
pub enum Decision {
    /// URL is authoritative; persist its version
    Persist(String),
    /// Remembered version wins over an ambiguous `latest`
    Redirect(String),
    /// Leave the URL version as-is
    Stand(String),
}

impl Decision {
    /// Version to display after the decision is applied
    pub fn version(&self) -> &str {
        match self {
            Decision::Persist(v) | Decision::Redirect(v) | Decision::Stand(v) => v,
        }
    }
}

pub fn reconcile<F>(url_version: &str, versions: &VersionSet, remembered: F) -> Decision
where
    F: FnOnce() -> Option<String>,
{
    if !is_latest(url_version) {
        if versions.contains(url_version) {
            return Decision::Persist(url_version.to_string());
        }
        return Decision::Stand(url_version.to_string());
    }

    match remembered() {
        Some(version)
            if !version.is_empty() && !is_latest(&version) && versions.contains(&version) =>
        {
            Decision::Redirect(version)
        }
        _ => Decision::Stand(url_version.to_string()),
    }
}
