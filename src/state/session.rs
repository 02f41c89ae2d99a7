//! VersioningSession: one entity view, driven by navigation events
//!
//! Per navigation:
//! 1. Check the entity-identifying path against the last one (`NavigationGate`).
//! 2. Resolve the location into a fresh `NavigationContext` (sync); stop if
//!    the path did not change.
//! 3. Fetch the published versions, then the entity UID (async).
//! 4. Reconcile and either persist, redirect, or leave the URL standing.
//!
//! Every qualifying navigation bumps a generation counter. Work that resumes
//! after a newer navigation started is dropped as `Superseded`, so an old UID
//! is never used against the newer navigation's remembered version.

use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::gate::NavigationGate;
use super::navigator::{LocationHost, Navigator};
use super::reconcile::{reconcile, Decision};
use super::store::{KeyValueStore, VersionStore};
use crate::backend::{EntityUid, MetadataSource};
use crate::config::VersioningConfig;
use crate::error::{Result, VersioningError};
use crate::resolve::{is_latest, NavigationContext, VersionSet, LATEST};

// =============================================================================
// Shared view state
// =============================================================================

/// Version currently in effect, shared with the link rewriter
#[derive(Debug, Clone)]
pub struct ActiveVersion(Rc<RefCell<String>>);

impl Default for ActiveVersion {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(LATEST.to_string())))
    }
}

impl ActiveVersion {
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn set(&self, version: &str) {
        *self.0.borrow_mut() = version.to_string();
    }
}

/// Data contract of the version dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorModel {
    pub selected: String,
    pub options: Vec<String>,
    /// Warning icon next to the selector
    pub show_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum NavigationOutcome {
    /// Location does not identify an entity
    Unresolved { reason: String },
    /// Same entity as before, no backend calls made
    Skipped { version: String },
    /// URL version kept (and persisted when published)
    Confirmed { decision: Decision },
    /// Remembered version restored via location replace
    Redirected { version: String, href: String },
    /// A newer navigation started while this one was waiting
    Superseded,
}

// =============================================================================
// VersioningSession
// =============================================================================

pub struct VersioningSession<L, S, M> {
    location: L,
    store: VersionStore<S>,
    metadata: M,
    gate: RefCell<NavigationGate>,
    generation: Cell<u64>,
    context: RefCell<Option<NavigationContext>>,
    entity_uid: RefCell<Option<EntityUid>>,
    versions: RefCell<VersionSet>,
    selected: RefCell<String>,
    active: ActiveVersion,
}

impl<L, S, M> VersioningSession<L, S, M>
where
    L: LocationHost,
    S: KeyValueStore,
    M: MetadataSource,
{
    pub fn new(config: &VersioningConfig, location: L, store: S, metadata: M) -> Self {
        Self {
            location,
            store: VersionStore::new(store, config.storage_prefix.clone()),
            metadata,
            gate: RefCell::new(NavigationGate::new()),
            generation: Cell::new(0),
            context: RefCell::new(None),
            entity_uid: RefCell::new(None),
            versions: RefCell::new(VersionSet::new()),
            selected: RefCell::new(LATEST.to_string()),
            active: ActiveVersion::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn active_version(&self) -> ActiveVersion {
        self.active.clone()
    }

    pub fn context(&self) -> Option<NavigationContext> {
        self.context.borrow().clone()
    }

    pub fn entity_uid(&self) -> Option<EntityUid> {
        self.entity_uid.borrow().clone()
    }

    pub fn versions(&self) -> VersionSet {
        self.versions.borrow().clone()
    }

    pub fn store(&self) -> &VersionStore<S> {
        &self.store
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn selector_model(&self) -> SelectorModel {
        let selected = self.selected.borrow().clone();
        SelectorModel {
            show_warning: !is_latest(&selected),
            options: self.versions.borrow().to_vec(),
            selected,
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.get() != generation
    }

    fn show(&self, version: &str) {
        *self.selected.borrow_mut() = version.to_string();
        self.active.set(version);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Handle a location change
    pub async fn on_navigation(&self) -> Result<NavigationOutcome> {
        let location = self.location.current()?;
        // Every location passes the gate, so leaving and re-entering an entity re-runs
        let changed = self.gate.borrow_mut().has_changed(&location.pathname);
        let generation = if changed {
            let next = self.generation.get() + 1;
            self.generation.set(next);
            *self.entity_uid.borrow_mut() = None;
            next
        } else {
            self.generation.get()
        };

        let ctx = match NavigationContext::resolve(&location) {
            Ok(ctx) => ctx,
            Err(err) => {
                log_debug!("[VersioningSession] {} does not identify an entity: {}", location.href, err);
                *self.context.borrow_mut() = None;
                return Ok(NavigationOutcome::Unresolved {
                    reason: err.to_string(),
                });
            }
        };

        self.show(&ctx.version);
        *self.context.borrow_mut() = Some(ctx.clone());

        if !changed {
            return Ok(NavigationOutcome::Skipped {
                version: ctx.version,
            });
        }

        let versions = self.metadata.fetch_versions(&ctx.entity).await;
        if self.is_stale(generation) {
            return Ok(NavigationOutcome::Superseded);
        }
        *self.versions.borrow_mut() = versions.clone();

        let uid = match self.metadata.fetch_entity_uid(&ctx.entity).await {
            Ok(uid) => uid,
            Err(_) if self.is_stale(generation) => return Ok(NavigationOutcome::Superseded),
            Err(err) => {
                log_error!("[VersioningSession] {}", err);
                log_error!("[VersioningSession] Check if latest version is available and was built correctly.");
                return Err(err);
            }
        };
        if self.is_stale(generation) {
            return Ok(NavigationOutcome::Superseded);
        }
        *self.entity_uid.borrow_mut() = Some(uid.clone());

        let decision = reconcile(&ctx.version, &versions, || self.store.get(&uid));
        match decision {
            Decision::Persist(ref version) => {
                if let Err(err) = self.store.set(&uid, version) {
                    log_warn!("[VersioningSession] Could not remember version {}: {}", version, err);
                }
                Ok(NavigationOutcome::Confirmed { decision })
            }
            Decision::Redirect(version) => {
                self.show(&version);
                // Same-entity navigations during the fetch only updated the context
                let current = self.context().unwrap_or(ctx);
                let href = Navigator::new(&self.location, &self.store).change_page(
                    &current,
                    Some(&uid),
                    &version,
                )?;
                Ok(NavigationOutcome::Redirected { version, href })
            }
            Decision::Stand(_) => Ok(NavigationOutcome::Confirmed { decision }),
        }
    }

    /// Dropdown selection; only published versions are accepted
    pub fn select_version(&self, version: &str) -> Result<String> {
        let ctx = self.context().ok_or(VersioningError::NoActiveView)?;
        if !self.versions.borrow().contains(version) {
            return Err(VersioningError::UnknownVersion(version.to_string()));
        }
        self.show(version);
        let uid = self.entity_uid();
        Navigator::new(&self.location, &self.store).change_page(&ctx, uid.as_deref(), version)
    }
}
