//! TechDocs Versioning: version selector for versioned documentation sites
//!
//! A Rust/WASM implementation of the TechDocs version selector add-on.
//!
//! # Architecture
//!
//! ## Resolution (`resolve/`)
//! - `entity.rs` - EntityIdentity: namespace/kind/name from fixed URL segments
//! - `paths.rs` - RootUrl + directory path (version segment removed) + version from URL
//! - `version.rs` - VersionSet, release / merge-request classification
//! - `context.rs` - NavigationContext: immutable per-navigation state
//!
//! ## Backend (`backend/`)
//! - `http.rs` - HttpClient + CredentialProvider seams
//! - `retry.rs` - RetryPolicy with exponential backoff
//! - `metadata.rs` - MetadataClient: versions.json manifest + entity UID
//! - `build_strategy.rs` - BuildStrategy: rebuild locally when no published manifest exists
//!
//! ## State (`state/`)
//! - `store.rs` - KeyValueStore seam + VersionStore (session persisted selection)
//! - `gate.rs` - NavigationGate: skip recomputation on cosmetic path changes
//! - `reconcile.rs` - Reconciler decision table
//! - `navigator.rs` - Navigator: persist + location replace
//! - `session.rs` - VersioningSession: one navigation end to end
//!
//! ## Link rewriting (`rewrite/`)
//! - `observer.rs` - ActivationObserver seam + composed path model
//! - `link.rs` - LinkRewriter: edit-link policy per active version
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { TechDocsVersioning } from 'techdocs-versioning';
//!
//! await init();
//!
//! const versioning = new TechDocsVersioning(
//!   { backendBaseUrl: 'https://backstage.example.com' },
//!   async () => (await identityApi.getCredentials()).token,
//!   alert => alertApi.post(alert),
//! );
//!
//! // On every location change
//! const model = await versioning.onNavigation();
//! console.log(model.selected, model.options, model.showWarning);
//!
//! versioning.attachLinkRewriter();
//! // Dropdown change
//! versioning.selectVersion('v1.2');
//! // Unmount
//! versioning.detach();
//! ```

#[macro_use]
pub mod console;

pub mod config;
pub mod error;

pub mod resolve;
pub mod backend;
pub mod state;
pub mod rewrite;
pub mod web;

pub use config::*;
pub use error::*;
pub use resolve::*;
pub use backend::*;
pub use state::*;
pub use rewrite::*;
pub use web::*;

use wasm_bindgen::prelude::*;

/// Plugin id the add-on registers under
pub const PLUGIN_ID: &str = "techdocs-addon-versioning";
/// Add-on extension name
pub const ADDON_NAME: &str = "VersionSelector";
/// Add-on mount location inside the TechDocs reader
pub const ADDON_LOCATION: &str = "Subheader";

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("techdocs-versioning v{}", env!("CARGO_PKG_VERSION"))
}
