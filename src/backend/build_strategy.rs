//! BuildStrategy: decide whether docs must be built locally
//!
//! Published sites carry a `versions.json` manifest in the content store.
//! When it is missing, or the lookup fails for any reason, the docs backend
//! should rebuild the entity from source.

#![allow(async_fn_in_trait)]

use serde::Deserialize;

use crate::error::Result;

/// Content store holding published documentation
pub trait ObjectStore {
    /// Succeeds when the object at `key` exists
    async fn get_object(&self, key: &str) -> Result<()>;
}

/// Catalog entity as received by the docs backend
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntity {
    pub kind: String,
    pub metadata: CatalogEntityMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntityMetadata {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl CatalogEntity {
    pub fn new(namespace: &str, kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            metadata: CatalogEntityMetadata {
                name: name.to_string(),
                namespace: Some(namespace.to_string()),
            },
        }
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or("default")
    }

    /// Store key of the published version manifest, lower-cased
    pub fn manifest_key(&self) -> String {
        format!(
            "{}/{}/{}/versions.json",
            self.namespace(),
            self.kind,
            self.metadata.name
        )
        .to_lowercase()
    }
}

pub struct BuildStrategy<O> {
    store: O,
}

impl<O: ObjectStore> BuildStrategy<O> {
    pub fn new(store: O) -> Self {
        Self { store }
    }

    pub async fn should_build(&self, entity: &CatalogEntity) -> bool {
        let name = &entity.metadata.name;
        match self.store.get_object(&entity.manifest_key()).await {
            Ok(()) => {
                log_info!("[BuildStrategy] Entity {} exists in the content store. Loading the docs from there...", name);
                false
            }
            Err(err) => {
                log_info!("[BuildStrategy] Entity {} does not exist in the content store. Rebuilding the docs locally...", name);
                log_debug!("[BuildStrategy] Error loading entity {} from the content store: {}", name, err);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersioningError;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct MemoryObjects {
        keys: HashSet<String>,
        fail: bool,
        lookups: RefCell<Vec<String>>,
    }

    impl ObjectStore for MemoryObjects {
        async fn get_object(&self, key: &str) -> Result<()> {
            self.lookups.borrow_mut().push(key.to_string());
            if self.fail {
                return Err(VersioningError::Storage("access denied".into()));
            }
            if self.keys.contains(key) {
                Ok(())
            } else {
                Err(VersioningError::Storage(format!("NoSuchKey: {}", key)))
            }
        }
    }

    #[test]
    fn test_manifest_key_lowercased() {
        let entity = CatalogEntity::new("Default", "Component", "My-Service");
        assert_eq!(entity.manifest_key(), "default/component/my-service/versions.json");
    }

    #[test]
    fn test_namespace_defaults() {
        let entity: CatalogEntity =
            serde_json::from_str(r#"{"kind":"API","metadata":{"name":"payments"}}"#).unwrap();
        assert_eq!(entity.manifest_key(), "default/api/payments/versions.json");
    }

    #[test]
    fn test_published_entity_is_not_built() {
        let mut store = MemoryObjects::default();
        store.keys.insert("default/component/svc/versions.json".into());
        let strategy = BuildStrategy::new(store);
        let entity = CatalogEntity::new("default", "Component", "svc");
        assert!(!pollster::block_on(strategy.should_build(&entity)));
    }

    #[test]
    fn test_missing_manifest_builds() {
        let strategy = BuildStrategy::new(MemoryObjects::default());
        let entity = CatalogEntity::new("default", "component", "svc");
        assert!(pollster::block_on(strategy.should_build(&entity)));
        assert_eq!(
            *strategy.store.lookups.borrow(),
            vec!["default/component/svc/versions.json".to_string()]
        );
    }

    #[test]
    fn test_lookup_error_builds() {
        let mut store = MemoryObjects::default();
        store.keys.insert("default/component/svc/versions.json".into());
        store.fail = true;
        let strategy = BuildStrategy::new(store);
        assert!(pollster::block_on(
            strategy.should_build(&CatalogEntity::new("default", "component", "svc"))
        ));
    }
}
