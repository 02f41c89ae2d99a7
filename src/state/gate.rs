//! NavigationGate: re-entrancy guard for navigation handling
//!
//! The full resolve + fetch + reconcile pass only runs when the
//! entity-identifying part of the path changes. Moving between pages of the
//! same entity is skipped.

use crate::resolve::relevant_path;

// =============================================================================
// Types
// =============================================================================

/// Result of a gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResult {
    /// True if the relevant path differs from the previous check
    pub has_changed: bool,
    pub relevant_path: String,
    pub previous_path: Option<String>,
}

// =============================================================================
// NavigationGate
// =============================================================================

#[derive(Debug, Default)]
pub struct NavigationGate {
    /// Relevant path of the previous check
    last_path: Option<String>,
    /// Number of checks performed
    check_count: u64,
    /// Number of skipped (unchanged) checks
    skip_count: u64,
}

impl NavigationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a pathname; returns true if the entity view changed
    pub fn has_changed(&mut self, pathname: &str) -> bool {
        self.check(pathname).has_changed
    }

    /// Check and return detailed result
    pub fn check(&mut self, pathname: &str) -> GateResult {
        self.check_count += 1;

        let current = relevant_path(pathname);
        let previous_path = self.last_path.take();
        let has_changed = previous_path.as_deref() != Some(current.as_str());

        if !has_changed {
            self.skip_count += 1;
        }

        self.last_path = Some(current.clone());
        GateResult {
            has_changed,
            relevant_path: current,
            previous_path,
        }
    }

    pub fn check_count(&self) -> u64 {
        self.check_count
    }

    pub fn skip_count(&self) -> u64 {
        self.skip_count
    }

    pub fn last_path(&self) -> Option<&str> {
        self.last_path.as_deref()
    }

    /// Forget the previous path; the next check always passes
    pub fn reset(&mut self) {
        self.last_path = None;
        self.check_count = 0;
        self.skip_count = 0;
    }
}
