//! Version Store: remembered version per entity for the browser session
//!
//! Keys are `{prefix}-version-{entityUid}`. Concurrent tabs share the same
//! session storage key space; the last writer wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

/// Single-key get/set storage (`sessionStorage` in the browser)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct VersionStore<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> VersionStore<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, entity_uid: &str) -> String {
        format!("{}-version-{}", self.prefix, entity_uid)
    }

    /// Remembered version, `None` when absent or unreadable
    pub fn get(&self, entity_uid: &str) -> Option<String> {
        match self.store.get(&self.key(entity_uid)) {
            Ok(value) => value,
            Err(err) => {
                log_warn!("[VersionStore] Could not read remembered version: {}", err);
                None
            }
        }
    }

    pub fn set(&self, entity_uid: &str, version: &str) -> Result<()> {
        self.store.set(&self.key(entity_uid), version)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersioningError;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(VersioningError::Storage("SecurityError".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(VersioningError::Storage("QuotaExceededError".into()))
        }
    }

    #[test]
    fn test_key_format() {
        let store = VersionStore::new(MemoryStore::new(), "techdocs-versioning");
        assert_eq!(store.key("uid-1"), "techdocs-versioning-version-uid-1");
    }

    #[test]
    fn test_set_then_get() {
        let memory = MemoryStore::new();
        let store = VersionStore::new(memory.clone(), "p");
        assert_eq!(store.get("uid-1"), None);
        store.set("uid-1", "v1.0").unwrap();
        assert_eq!(store.get("uid-1").as_deref(), Some("v1.0"));
        assert_eq!(memory.get("p-version-uid-1").unwrap().as_deref(), Some("v1.0"));
    }

    #[test]
    fn test_entities_do_not_collide() {
        let store = VersionStore::new(MemoryStore::new(), "p");
        store.set("a", "v1").unwrap();
        store.set("b", "v2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("v1"));
        assert_eq!(store.get("b").as_deref(), Some("v2"));
    }

    #[test]
    fn test_last_writer_wins() {
        let shared = MemoryStore::new();
        let tab_one = VersionStore::new(shared.clone(), "p");
        let tab_two = VersionStore::new(shared.clone(), "p");
        tab_one.set("uid", "v1").unwrap();
        tab_two.set("uid", "v2").unwrap();
        assert_eq!(tab_one.get("uid").as_deref(), Some("v2"));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_read_error_is_absent() {
        let store = VersionStore::new(BrokenStore, "p");
        assert_eq!(store.get("uid"), None);
        assert!(store.set("uid", "v1").is_err());
    }
}
