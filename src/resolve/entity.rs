//! Entity Locator: namespace / kind / name from fixed URL path segments
//!
//! Both URL shapes put the identity at the same positions:
//! - `/docs/{namespace}/{kind}/{name}/...`
//! - `/catalog/{namespace}/{kind}/{name}/docs/...`
//!
//! No validation is done on segment content. Short paths produce a partial
//! identity with `None` fields.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VersioningError};

const NAMESPACE_INDEX: usize = 2;
const KIND_INDEX: usize = 3;
const NAME_INDEX: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityIdentity {
    pub namespace: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl EntityIdentity {
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            kind: Some(kind.into()),
            name: Some(name.into()),
        }
    }

    /// Locate the entity in `href`, dropping `origin` when `href` starts with it.
    ///
    /// Absolute URLs on another origin fall back to their path.
    pub fn locate(href: &str, origin: &str) -> Self {
        let relative = if !origin.is_empty() && href.starts_with(origin) {
            &href[origin.len()..]
        } else {
            href
        };
        if relative.contains("://") {
            if let Ok(url) = Url::parse(relative) {
                return Self::from_path(url.path());
            }
        }
        Self::from_path(relative)
    }

    /// Locate the entity in an origin-relative path
    pub fn from_path(path: &str) -> Self {
        let parts: Vec<&str> = path.split('/').collect();
        let segment = |index: usize| {
            parts
                .get(index)
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
        };
        Self {
            namespace: segment(NAMESPACE_INDEX),
            kind: segment(KIND_INDEX),
            name: segment(NAME_INDEX),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.namespace.is_some() && self.kind.is_some() && self.name.is_some()
    }

    /// Borrow all three parts, failing on the first missing one
    pub fn parts(&self) -> Result<(&str, &str, &str)> {
        let namespace = self
            .namespace
            .as_deref()
            .ok_or(VersioningError::IncompleteEntity("namespace"))?;
        let kind = self
            .kind
            .as_deref()
            .ok_or(VersioningError::IncompleteEntity("kind"))?;
        let name = self
            .name
            .as_deref()
            .ok_or(VersioningError::IncompleteEntity("name"))?;
        Ok((namespace, kind, name))
    }

    /// `{namespace}/{kind}/{name}` as used by backend endpoints
    pub fn ref_path(&self) -> Result<String> {
        let (namespace, kind, name) = self.parts()?;
        Ok(format!("{}/{}/{}", namespace, kind, name))
    }
}

impl std::fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let part = |p: &Option<String>| p.clone().unwrap_or_else(|| "?".to_string());
        write!(
            f,
            "{}:{}/{}",
            part(&self.kind),
            part(&self.namespace),
            part(&self.name)
        )
    }
}

/// Entity-identifying prefix of a pathname: `/{seg1}/{seg2}/{seg3}/{seg4}`.
///
/// Two locations with the same relevant path show the same entity view.
pub fn relevant_path(pathname: &str) -> String {
    let parts: Vec<&str> = pathname.split('/').collect();
    let segment = |index: usize| parts.get(index).copied().unwrap_or_default();
    format!(
        "/{}/{}/{}/{}",
        segment(1),
        segment(2),
        segment(3),
        segment(4)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:3000";

    #[test]
    fn test_standalone_path() {
        let entity = EntityIdentity::locate(
            "http://localhost:3000/docs/default/component/my-service/guide/",
            ORIGIN,
        );
        assert_eq!(entity, EntityIdentity::new("default", "component", "my-service"));
    }

    #[test]
    fn test_catalog_path() {
        let entity = EntityIdentity::locate(
            "http://localhost:3000/catalog/team-a/api/payments/docs/versions/v1/",
            ORIGIN,
        );
        assert_eq!(entity, EntityIdentity::new("team-a", "api", "payments"));
    }

    #[test]
    fn test_recovers_arbitrary_standalone_identities() {
        let cases = [
            ("default", "component", "svc"),
            ("ns-1", "system", "a.b.c"),
            ("x", "y", "z"),
        ];
        for (ns, kind, name) in cases {
            for tail in ["", "/", "/guide", "/versions/v1/deep/page"] {
                let href = format!("{}/docs/{}/{}/{}{}", ORIGIN, ns, kind, name, tail);
                assert_eq!(
                    EntityIdentity::locate(&href, ORIGIN),
                    EntityIdentity::new(ns, kind, name),
                    "href {}",
                    href
                );
            }
        }
    }

    #[test]
    fn test_short_path_is_partial_not_error() {
        let entity = EntityIdentity::locate("http://localhost:3000/docs/default", ORIGIN);
        assert_eq!(entity.namespace.as_deref(), Some("default"));
        assert!(entity.kind.is_none());
        assert!(entity.name.is_none());
        assert!(!entity.is_complete());
        assert!(matches!(
            entity.parts(),
            Err(VersioningError::IncompleteEntity("kind"))
        ));
    }

    #[test]
    fn test_relative_path_without_origin() {
        let entity = EntityIdentity::locate("/docs/default/component/svc", ORIGIN);
        assert_eq!(entity.ref_path().unwrap(), "default/component/svc");
    }

    #[test]
    fn test_foreign_origin_uses_path() {
        let entity = EntityIdentity::locate("https://other.example/docs/a/b/c", ORIGIN);
        assert_eq!(entity, EntityIdentity::new("a", "b", "c"));
    }

    #[test]
    fn test_relevant_path() {
        assert_eq!(
            relevant_path("/docs/default/component/svc/versions/v1/guide"),
            "/docs/default/component/svc"
        );
        assert_eq!(relevant_path("/docs"), "/docs///");
    }
}
