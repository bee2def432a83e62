//! Dock window
//!
//! A dockable panel identified by id, paired with the content host that
//! holds its tabs. Windows are shared by identity; their lifecycle belongs
//! to the shell, not to the layers that route tabs into them.

use std::sync::Arc;

use crate::host::ContentHost;

pub struct DockWindow {
    id: String,
    host: Arc<ContentHost>,
}

impl DockWindow {
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            host: ContentHost::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn host(&self) -> &Arc<ContentHost> {
        &self.host
    }
}

impl std::fmt::Debug for DockWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockWindow")
            .field("id", &self.id)
            .field("tabs", &self.host.len())
            .finish()
    }
}
