//! Routing configuration
//!
//! The commit-window flag is an explicit value handed to the router.
//! Routing decisions re-read it on every call, so a toggle takes effect on
//! the next add or attach.

use serde::{Deserialize, Serialize};

use crate::order::{CHANGES, SHELF};

/// Id of the default source-control window.
pub const SCM_WINDOW_ID: &str = "Source Control";

/// Id of the separate commit window used when
/// [`RouterConfig::use_commit_window`] is set.
pub const COMMIT_WINDOW_ID: &str = "Commit";

/// Tab names that move to the commit window when it is enabled.
pub fn is_commit_window_tab(tab_name: &str) -> bool {
    tab_name == CHANGES || tab_name == SHELF
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Route the commit-related tabs into their own window
    pub use_commit_window: bool,
}

impl RouterConfig {
    pub fn new(use_commit_window: bool) -> Self {
        Self { use_commit_window }
    }

    /// Read the flag from `ATRIUM_COMMIT_WINDOW`; unset means disabled.
    pub fn from_env() -> Self {
        let use_commit_window = std::env::var("ATRIUM_COMMIT_WINDOW")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "on" | "yes"))
            .unwrap_or(false);
        Self { use_commit_window }
    }

    /// Window id a tab with the given name routes to.
    pub fn window_id_for(&self, tab_name: &str) -> &'static str {
        if self.use_commit_window && is_commit_window_tab(tab_name) {
            COMMIT_WINDOW_ID
        } else {
            SCM_WINDOW_ID
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new(false)
    }
}
