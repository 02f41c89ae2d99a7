//! LinkRewriter: point "edit this page" at the branch of the active version
//!
//! Only acts when the active version is not `latest` and the activated
//! anchor is the content's edit button:
//! - release version: cancel, disable the anchor, warn once
//! - merge-request version `MR-<id>-<branch>`: edit `<branch>`
//! - other version still pointing at the default branch: edit `<version>`
//!
//! The edit URL then opens in a new browsing context. The default navigation
//! of the edit button is always cancelled.

use regex::{NoExpand, Regex};
use std::cell::Cell;
use std::rc::Rc;

use super::observer::{Activation, ActivationObserver, AnchorInfo, LinkEffects, Notifier};
use crate::config::{EditLinkConfig, VersioningConfig};
use crate::error::Result;
use crate::resolve::{is_latest, VersionKind};
use crate::state::ActiveVersion;

pub const RELEASE_EDIT_MESSAGE: &str = "This version is a release and cannot be edited.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Not an edit button, or nothing to rewrite for `latest`
    Ignore,
    /// Release version: edit button disabled
    Disable { tooltip: String },
    /// Open the (possibly rewritten) edit URL
    Open { url: String },
}

pub struct LinkRewriter {
    markers: EditLinkConfig,
    default_branch: String,
    branch_segment_re: Regex,
    warned: Cell<bool>,
}

impl LinkRewriter {
    pub fn new(config: &VersioningConfig) -> Self {
        Self {
            markers: config.edit_link.clone(),
            default_branch: config.default_branch.clone(),
            // `/edit/<branch>/` in forge edit URLs
            branch_segment_re: Regex::new(r"(/edit/)[^/]+/").unwrap(),
            warned: Cell::new(false),
        }
    }

    pub fn is_edit_link(&self, anchor: &AnchorInfo) -> bool {
        !anchor.href.is_empty()
            && anchor.has_class(&self.markers.class_marker)
            && anchor.title.contains(&self.markers.title_marker)
    }

    /// Edit URL for `version`; release versions are handled by the caller
    pub fn rewrite_edit_url(&self, edit_url: &str, version: &str) -> String {
        match VersionKind::classify(version) {
            VersionKind::MergeRequest { branch } => {
                let replacement = format!("/edit/{}/", branch);
                self.branch_segment_re
                    .replacen(edit_url, 1, NoExpand(&replacement))
                    .into_owned()
            }
            _ => {
                let default_segment = format!("/edit/{}/", self.default_branch);
                if edit_url.contains(&default_segment) {
                    edit_url.replacen(&default_segment, &format!("/edit/{}/", version), 1)
                } else {
                    edit_url.to_string()
                }
            }
        }
    }

    /// Pure decision for an activation under `version`
    pub fn decide(&self, version: &str, activation: &Activation) -> LinkAction {
        if is_latest(version) {
            return LinkAction::Ignore;
        }
        let Some(anchor) = activation.nearest_anchor() else {
            return LinkAction::Ignore;
        };
        if !self.is_edit_link(anchor) {
            return LinkAction::Ignore;
        }
        if !VersionKind::classify(version).is_editable() {
            return LinkAction::Disable {
                tooltip: RELEASE_EDIT_MESSAGE.to_string(),
            };
        }
        LinkAction::Open {
            url: self.rewrite_edit_url(&anchor.href, version),
        }
    }

    /// Decide and apply through `effects`; the release warning is shown once
    pub fn handle(
        &self,
        version: &str,
        activation: &Activation,
        effects: &mut dyn LinkEffects,
        notifier: &dyn Notifier,
    ) -> LinkAction {
        let action = self.decide(version, activation);
        match &action {
            LinkAction::Ignore => {}
            LinkAction::Disable { tooltip } => {
                effects.prevent_default();
                effects.disable(tooltip);
                if !self.warned.replace(true) {
                    notifier.warn(RELEASE_EDIT_MESSAGE);
                }
            }
            LinkAction::Open { url } => {
                effects.prevent_default();
                log_info!("[LinkRewriter] Opening edit url for version {}: {}", version, url);
                effects.open_in_new_context(url);
            }
        }
        action
    }
}

/// Register `rewriter` with `observer`, reading the version at click time
pub fn attach_link_rewriter<O, N>(
    observer: &O,
    rewriter: Rc<LinkRewriter>,
    active: ActiveVersion,
    notifier: Rc<N>,
) -> Result<O::Subscription>
where
    O: ActivationObserver,
    N: Notifier + 'static,
{
    observer.observe(Box::new(move |activation, effects| {
        rewriter.handle(&active.get(), activation, effects, notifier.as_ref());
    }))
}
