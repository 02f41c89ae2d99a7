//! In-memory doubles for every seam of `VersioningSession`


use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::backend::{EntityUid, MetadataSource};
use crate::config::VersioningConfig;
use crate::error::{Result, VersioningError};
use crate::resolve::{EntityIdentity, Location, VersionSet};
use crate::state::{LocationHost, MemoryStore, VersioningSession};

pub const ORIGIN: &str = "http://localhost:3000";

/// Browser location whose href tests can move around
#[derive(Clone, Default)]
pub struct FakeLocation {
    pub href: Rc<RefCell<String>>,
    pub replaced: Rc<RefCell<Vec<String>>>,
}

impl FakeLocation {
    pub fn at(path: &str) -> Self {
        let location = Self::default();
        location.go(path);
        location
    }

    pub fn go(&self, path: &str) {
        *self.href.borrow_mut() = format!("{}{}", ORIGIN, path);
    }
}

impl LocationHost for FakeLocation {
    fn current(&self) -> Result<Location> {
        Location::parse(&self.href.borrow())
    }

    fn replace(&self, href: &str) -> Result<()> {
        self.replaced.borrow_mut().push(href.to_string());
        *self.href.borrow_mut() = href.to_string();
        Ok(())
    }
}

/// Resolves once after being polled a second time
#[derive(Default)]
pub struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Backend answering from fixed tables
#[derive(Clone, Default)]
pub struct FakeMetadata {
    pub manifest: Rc<RefCell<Vec<String>>>,
    /// Entity name → UID; unknown names behave like an unreachable endpoint
    pub uids: Rc<RefCell<Vec<(String, String)>>>,
    pub version_calls: Rc<Cell<u32>>,
    pub uid_calls: Rc<Cell<u32>>,
    /// Suspend once inside each fetch, like a real request would
    pub suspend: bool,
}

impl FakeMetadata {
    pub fn with_manifest(manifest: &[&str]) -> Self {
        let fake = Self::default();
        *fake.manifest.borrow_mut() = manifest.iter().map(|v| v.to_string()).collect();
        fake
    }

    pub fn uid(self, name: &str, uid: &str) -> Self {
        self.uids.borrow_mut().push((name.to_string(), uid.to_string()));
        self
    }
}

impl MetadataSource for FakeMetadata {
    async fn fetch_versions(&self, _entity: &EntityIdentity) -> VersionSet {
        self.version_calls.set(self.version_calls.get() + 1);
        if self.suspend {
            YieldOnce::default().await;
        }
        VersionSet::from_manifest(self.manifest.borrow().clone())
    }

    async fn fetch_entity_uid(&self, entity: &EntityIdentity) -> Result<EntityUid> {
        self.uid_calls.set(self.uid_calls.get() + 1);
        if self.suspend {
            YieldOnce::default().await;
        }
        let name = entity.name.clone().unwrap_or_default();
        self.uids
            .borrow()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, uid)| uid.clone())
            .ok_or_else(|| VersioningError::EntityMetadataUnavailable {
                attempts: 5,
                last: Box::new(VersioningError::Status {
                    url: format!("http://backend/entity/{}", name),
                    status: 404,
                    status_text: "Not Found".into(),
                }),
            })
    }
}

pub type TestSession = VersioningSession<FakeLocation, MemoryStore, FakeMetadata>;

pub fn session(location: &FakeLocation, store: &MemoryStore, metadata: &FakeMetadata) -> TestSession {
    VersioningSession::new(
        &VersioningConfig::default(),
        location.clone(),
        store.clone(),
        metadata.clone(),
    )
}
