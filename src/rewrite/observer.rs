//! Activation observer seam
//!
//! The rewriting policy never touches the DOM. An observer (document click
//! listener in the browser) turns each activation into an `Activation`: the
//! full composed event path, so anchors inside shadow roots are found too.
//! Side effects on the nearest anchor go back through `LinkEffects`.

use crate::error::Result;

/// Anchor element as seen by the policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnchorInfo {
    pub href: String,
    pub classes: Vec<String>,
    pub title: String,
}

impl AnchorInfo {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One hop of the composed event path, innermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    Anchor(AnchorInfo),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activation {
    pub path: Vec<PathEntry>,
}

impl Activation {
    pub fn on_anchor(anchor: AnchorInfo) -> Self {
        Self {
            path: vec![PathEntry::Other, PathEntry::Anchor(anchor), PathEntry::Other],
        }
    }

    /// Closest enclosing anchor with a non-empty href
    pub fn nearest_anchor(&self) -> Option<&AnchorInfo> {
        self.path.iter().find_map(|entry| match entry {
            PathEntry::Anchor(anchor) if !anchor.href.is_empty() => Some(anchor),
            _ => None,
        })
    }
}

/// Effects applied to the activation and its nearest anchor
pub trait LinkEffects {
    /// Cancel the default navigation
    fn prevent_default(&mut self);
    /// Make the anchor inert and explain why in its tooltip
    fn disable(&mut self, tooltip: &str);
    /// Open `url` in a new browsing context
    fn open_in_new_context(&mut self, url: &str);
}

/// User-facing notifications
pub trait Notifier {
    fn warn(&self, message: &str);
}

pub type ActivationHandler = Box<dyn FnMut(&Activation, &mut dyn LinkEffects)>;

/// Source of link activations. Dropping the returned subscription
/// deregisters the handler.
pub trait ActivationObserver {
    type Subscription;

    fn observe(&self, handler: ActivationHandler) -> Result<Self::Subscription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str) -> AnchorInfo {
        AnchorInfo {
            href: href.to_string(),
            classes: vec!["md-content__button".into(), "md-icon".into()],
            title: "Edit this page".into(),
        }
    }

    #[test]
    fn test_nearest_anchor_is_innermost() {
        let activation = Activation {
            path: vec![
                PathEntry::Other,
                PathEntry::Anchor(anchor("https://git/inner")),
                PathEntry::Anchor(anchor("https://git/outer")),
            ],
        };
        assert_eq!(activation.nearest_anchor().unwrap().href, "https://git/inner");
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let activation = Activation {
            path: vec![PathEntry::Anchor(anchor("")), PathEntry::Anchor(anchor("https://git/x"))],
        };
        assert_eq!(activation.nearest_anchor().unwrap().href, "https://git/x");
        assert!(Activation::default().nearest_anchor().is_none());
    }

    #[test]
    fn test_has_class() {
        assert!(anchor("x").has_class("md-content__button"));
        assert!(!anchor("x").has_class("md-content"));
    }
}
