//! `window.sessionStorage` as a `KeyValueStore`

use super::window::{browser_window, js_error};
use crate::error::{Result, VersioningError};
use crate::state::KeyValueStore;

pub struct SessionStorage {
    storage: web_sys::Storage,
}

impl SessionStorage {
    pub fn new() -> Result<Self> {
        let storage = browser_window()?
            .session_storage()
            .map_err(|e| js_error("window.sessionStorage", e))?
            .ok_or_else(|| VersioningError::Storage("sessionStorage is not available".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| VersioningError::Storage(format!("getItem({}): {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| VersioningError::Storage(format!("setItem({}): {:?}", key, e)))
    }
}
