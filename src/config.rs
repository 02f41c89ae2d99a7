//! Configuration types and defaults for the version selector

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::backend::retry::RetryPolicy;
use crate::error::{Result, VersioningError};

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:7007";
pub const DEFAULT_METADATA_PATH: &str = "/api/techdocs/metadata";
pub const DEFAULT_STATIC_DOCS_PATH: &str = "/api/techdocs/static/docs";
pub const DEFAULT_STORAGE_PREFIX: &str = "techdocs-versioning";
pub const DEFAULT_BRANCH: &str = "main";

// =============================================================================
// Edit Link Markers
// =============================================================================

/// How the "edit this page" anchor is recognised in rendered content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditLinkConfig {
    /// CSS class the anchor must carry
    pub class_marker: String,
    /// Substring the anchor title must contain
    pub title_marker: String,
}

impl Default for EditLinkConfig {
    fn default() -> Self {
        Self {
            class_marker: "md-content__button".to_string(),
            title_marker: "Edit this page".to_string(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersioningConfig {
    /// Backend base URL (`backend.baseUrl`)
    pub backend_base_url: String,
    /// Path of the catalog metadata API below the backend
    pub metadata_path: String,
    /// Path of the static docs file server below the backend
    pub static_docs_path: String,
    /// Prefix of every session storage key
    pub storage_prefix: String,
    /// Branch literal that edit URLs point at by default
    pub default_branch: String,
    pub edit_link: EditLinkConfig,
    /// Retry policy for entity metadata lookups
    pub retry: RetryPolicy,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            static_docs_path: DEFAULT_STATIC_DOCS_PATH.to_string(),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            edit_link: EditLinkConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl VersioningConfig {
    /// Config pointing at the given backend, everything else default
    pub fn with_backend(base_url: impl Into<String>) -> Self {
        Self {
            backend_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse from a JS object; missing fields take their defaults
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| VersioningError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend_base_url.trim().is_empty() {
            return Err(VersioningError::Config("backendBaseUrl is empty".into()));
        }
        if self.storage_prefix.is_empty() {
            return Err(VersioningError::Config("storagePrefix is empty".into()));
        }
        if self.default_branch.is_empty() {
            return Err(VersioningError::Config("defaultBranch is empty".into()));
        }
        self.retry.validate()
    }

    /// Base URL of the entity metadata endpoint
    pub fn metadata_base(&self) -> String {
        join_base(&self.backend_base_url, &self.metadata_path)
    }

    /// Base URL of the static documentation files
    pub fn static_files_base(&self) -> String {
        join_base(&self.backend_base_url, &self.static_docs_path)
    }
}

fn join_base(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
