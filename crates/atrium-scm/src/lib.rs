//! Atrium Source Control View
//!
//! Routes content tabs between the source-control tool windows. Every tab
//! goes to the "Source Control" window unless the commit window is enabled,
//! in which case the commit-related tabs get their own window. Inside each
//! window tabs keep a deterministic weight-based order, and tabs that arrive
//! before their window exists wait in a pending buffer.

mod config;
mod order;
mod router;

pub use config::{is_commit_window_tab, RouterConfig, COMMIT_WINDOW_ID, SCM_WINDOW_ID};
pub use order::{content_weight, OrderWeight, BRANCHES, CHANGES, INCOMING, REPOSITORY, SHELF};
pub use router::ContentRouter;

// Re-export dock primitives
pub use atrium_dock::{
    Content, ContentHost, ContentInitializer, ContentRef, DockError, DockWindow, ListenerId,
    SelectionEvent,
};

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
