//! Navigator: switch the page to another version
//!
//! Persists the chosen version, then replaces (never pushes) the location so
//! version switches stay out of the back-navigation history.

use crate::error::Result;
use crate::resolve::{Location, NavigationContext};

use super::store::{KeyValueStore, VersionStore};

/// The browser location as seen by the session
pub trait LocationHost {
    fn current(&self) -> Result<Location>;
    /// Replace the current history entry with `href`
    fn replace(&self, href: &str) -> Result<()>;
}

pub struct Navigator<'a, L, S> {
    location: &'a L,
    store: &'a VersionStore<S>,
}

impl<'a, L: LocationHost, S: KeyValueStore> Navigator<'a, L, S> {
    pub fn new(location: &'a L, store: &'a VersionStore<S>) -> Self {
        Self { location, store }
    }

    /// Show the page of `ctx` at `version`; returns the new location.
    ///
    /// Without a known entity UID the choice is not remembered.
    pub fn change_page(
        &self,
        ctx: &NavigationContext,
        entity_uid: Option<&str>,
        version: &str,
    ) -> Result<String> {
        match entity_uid {
            Some(uid) => {
                if let Err(err) = self.store.set(uid, version) {
                    log_warn!("[Navigator] Could not remember version {}: {}", version, err);
                }
            }
            None => log_warn!(
                "[Navigator] Entity UID unknown, version {} is not remembered",
                version
            ),
        }

        let href = ctx.href_for(version);
        log_info!("[Navigator] Switching to version {}: {}", version, href);
        self.location.replace(&href)?;
        Ok(href)
    }
}
