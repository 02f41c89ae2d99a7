//! Path Resolver + Version Extractor
//!
//! An entity's documentation lives under one of two roots:
//! - standalone: `/docs/{ns}/{kind}/{name}`
//! - catalog-embedded: `/catalog/{ns}/{kind}/{name}/docs`
//!
//! Below the root an optional `/versions/{token}` segment pair selects the
//! version, followed by the content sub-path (the "directory path").

use serde::{Serialize, Serializer};
use url::Url;

use super::entity::EntityIdentity;
use super::location::Location;
use super::version::{is_latest, LATEST, VERSIONS_DIRECTORY};
use crate::error::{Result, VersioningError};

/// True for `/catalog...` and bare `catalog...` paths
pub fn is_catalog_path(path: &str) -> bool {
    path.starts_with("/catalog") || path.starts_with("catalog")
}

// =============================================================================
// RootUrl
// =============================================================================

/// Canonical base URL of one entity's documentation site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootUrl {
    url: Url,
    catalog: bool,
}

impl RootUrl {
    /// Build the root for `entity` on the host of `location`
    pub fn create(location: &Location, entity: &EntityIdentity, catalog: bool) -> Result<Self> {
        let (namespace, kind, name) = entity.parts()?;
        let mut raw = location.base();
        raw.push_str(if catalog { "/catalog" } else { "/docs" });
        raw.push_str(&format!("/{}/{}/{}", namespace, kind, name));
        if catalog {
            raw.push_str("/docs");
        }
        let url = Url::parse(&raw).map_err(|source| VersioningError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        Ok(Self { url, catalog })
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn is_catalog(&self) -> bool {
        self.catalog
    }

    /// Path of `href` below this root, or `href` unchanged when it is elsewhere
    fn strip<'a>(&self, href: &'a str) -> &'a str {
        href.strip_prefix(self.href()).unwrap_or(href)
    }
}

impl std::fmt::Display for RootUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.href())
    }
}

impl Serialize for RootUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.href())
    }
}

// =============================================================================
// Directory path
// =============================================================================

/// Content sub-path of `href` below `root`, version segment removed.
///
/// The document root is the empty string, never `/`.
pub fn directory_path(href: &str, root: &RootUrl) -> String {
    clean_directory_path(root.strip(href))
}

/// Drop empty segments and every `versions/{token}` pair from a relative path
pub fn clean_directory_path(relative: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut parts = relative.split('/');
    while let Some(part) = parts.next() {
        if part.is_empty() {
            continue;
        }
        if part == VERSIONS_DIRECTORY {
            parts.next();
            continue;
        }
        kept.push(part);
    }
    if kept.is_empty() {
        String::new()
    } else {
        format!("/{}", kept.join("/"))
    }
}

// =============================================================================
// Version extraction
// =============================================================================

/// Version token implied by `href`; `latest` when none is present
pub fn version_from_url(href: &str, root: &RootUrl, directory_path: &str) -> String {
    let mut rest: Vec<&str> = root
        .strip(href)
        .split('/')
        .filter(|part| !part.is_empty())
        .collect();
    // The sub-path is the trailing run of segments, never an earlier match
    let tail: Vec<&str> = directory_path
        .split('/')
        .filter(|part| !part.is_empty())
        .collect();
    if !tail.is_empty() && rest.ends_with(&tail) {
        rest.truncate(rest.len() - tail.len());
    }
    rest.into_iter()
        .find(|part| *part != VERSIONS_DIRECTORY)
        .map(str::to_string)
        .unwrap_or_else(|| LATEST.to_string())
}

/// Location showing `directory_path` at `version`.
///
/// The document root gets a trailing slash so the docs server serves its index.
pub fn version_href(root: &RootUrl, version: &str, directory_path: &str) -> String {
    let tail = if directory_path.is_empty() {
        "/"
    } else {
        directory_path
    };
    if is_latest(version) {
        format!("{}{}", root.href(), tail)
    } else {
        format!("{}/{}/{}{}", root.href(), VERSIONS_DIRECTORY, version, tail)
    }
}
