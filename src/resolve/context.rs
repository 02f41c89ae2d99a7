//! NavigationContext: everything derived synchronously from one location
//!
//! Built fresh on each navigation and never mutated afterwards. Later stages
//! (reconciler, navigator, link rewriter) receive it by reference.

use serde::Serialize;

use super::entity::{relevant_path, EntityIdentity};
use super::location::Location;
use super::paths::{directory_path, is_catalog_path, version_from_url, version_href, RootUrl};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    pub location: Location,
    pub entity: EntityIdentity,
    pub root_url: RootUrl,
    /// Content sub-path without version segment; empty for the document root
    pub directory_path: String,
    /// Version implied by the URL
    pub version: String,
}

impl NavigationContext {
    /// Entity Locator → Path Resolver → Version Extractor
    pub fn resolve(location: &Location) -> Result<Self> {
        let entity = EntityIdentity::locate(&location.href, &location.origin);
        let root_url = RootUrl::create(location, &entity, is_catalog_path(&location.pathname))?;
        let directory_path = directory_path(&location.href, &root_url);
        let version = version_from_url(&location.href, &root_url, &directory_path);
        Ok(Self {
            location: location.clone(),
            entity,
            root_url,
            directory_path,
            version,
        })
    }

    /// Re-entrancy key of this navigation
    pub fn relevant_path(&self) -> String {
        relevant_path(&self.location.pathname)
    }

    /// Same page at another version
    pub fn href_for(&self, version: &str) -> String {
        version_href(&self.root_url, version, &self.directory_path)
    }
}
