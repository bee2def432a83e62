//! Content router
//!
//! Decides which dock window each tab belongs to, keeps every window's tabs
//! in weight order, and buffers tabs whose window has not attached yet. The
//! router never owns the windows; it tracks them by identity and releases
//! its selection listeners when it is dropped.

use std::any::Any;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use atrium_dock::{Content, ContentRef, DockError, DockWindow, ListenerId};

use crate::config::RouterConfig;
use crate::order::content_weight;

struct AttachedWindow {
    window: Arc<DockWindow>,
    listener: ListenerId,
}

pub struct ContentRouter {
    windows: RwLock<Vec<AttachedWindow>>,
    /// Tabs waiting for their window to attach; owned by the router
    pending: Mutex<Vec<ContentRef>>,
    config: RwLock<RouterConfig>,
}

impl ContentRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            windows: RwLock::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            config: RwLock::new(config),
        }
    }

    pub fn config(&self) -> RouterConfig {
        self.config.read().clone()
    }

    /// Replace the routing configuration; takes effect on the next add or
    /// attach, tabs already placed are not moved.
    pub fn set_config(&self, config: RouterConfig) {
        *self.config.write() = config;
    }

    /// Window id a tab with the given name currently routes to.
    pub fn window_id_for(&self, tab_name: &str) -> &'static str {
        self.config.read().window_id_for(tab_name)
    }

    /// Attached window a tab with the given name resolves to.
    pub fn window_for(&self, tab_name: &str) -> Option<Arc<DockWindow>> {
        let window_id = self.window_id_for(tab_name);
        self.windows
            .read()
            .iter()
            .find(|attached| attached.window.id() == window_id)
            .map(|attached| Arc::clone(&attached.window))
    }

    /// Start routing tabs into a window.
    ///
    /// Installs the selection listener that runs one-shot tab initializers,
    /// drains every pending tab that resolves to this window, and selects the
    /// first tab so the window never opens without a selection. Attaching a
    /// window that is already tracked is a no-op.
    pub fn attach_window(&self, window: &Arc<DockWindow>) {
        {
            let mut windows = self.windows.write();
            if windows.iter().any(|a| Arc::ptr_eq(&a.window, window)) {
                return;
            }
            let listener = window
                .host()
                .add_selection_listener(|event| event.content.run_initializer());
            windows.push(AttachedWindow {
                window: Arc::clone(window),
                listener,
            });
        }
        tracing::info!(window = %window.id(), "Attached dock window");

        let drained: Vec<ContentRef> = {
            let mut pending = self.pending.lock();
            let mut drained = Vec::new();
            pending.retain(|content| match self.window_for(content.tab_name()) {
                Some(resolved) if Arc::ptr_eq(&resolved, window) => {
                    drained.push(Arc::clone(content));
                    false
                }
                _ => true,
            });
            drained
        };
        for content in drained {
            self.add_in_order(window, content);
        }

        // Ensure that first tab is selected after the reordering
        if let Some(first) = window.host().contents().first() {
            window.host().select(first);
        }
    }

    /// Stop routing tabs into a window and release its selection listener.
    /// Tabs already placed in the window stay with it.
    pub fn detach_window(&self, window: &Arc<DockWindow>) {
        let detached = {
            let mut windows = self.windows.write();
            windows
                .iter()
                .position(|a| Arc::ptr_eq(&a.window, window))
                .map(|index| windows.remove(index))
        };
        if let Some(attached) = detached {
            attached
                .window
                .host()
                .remove_selection_listener(attached.listener);
            tracing::info!(window = %attached.window.id(), "Detached dock window");
        }
    }

    /// Place a tab in its window, or buffer it until that window attaches.
    pub fn add_content(&self, content: ContentRef) {
        match self.window_for(content.tab_name()) {
            Some(window) => self.add_in_order(&window, content),
            None => {
                tracing::debug!(tab = %content.tab_name(), "No window attached, buffering tab");
                self.pending.lock().push(content);
            }
        }
    }

    /// Remove a tab. A tab in a live window is removed and disposed through
    /// its host; a tab whose window is gone or was never attached is dropped
    /// from the pending buffer and disposed directly.
    pub fn remove_content(&self, content: &ContentRef) {
        match content.host() {
            Some(host) if !host.is_disposed() => {
                host.remove(content, true);
            }
            _ => {
                self.pending.lock().retain(|c| !Arc::ptr_eq(c, content));
                content.dispose();
            }
        }
    }

    /// Select the tab with the given name, if one is attached. The pending
    /// buffer is never searched; an absent name is a no-op.
    pub fn select_content(&self, tab_name: &str) {
        if let Some(content) = self.find_in_windows(|c| c.tab_name() == tab_name) {
            self.set_selected_content(&content);
        }
    }

    /// Select a tab by reference through its current host.
    pub fn set_selected_content(&self, content: &ContentRef) {
        if let Some(host) = content.host() {
            host.select(content);
        }
    }

    pub fn is_content_selected(&self, tab_name: &str) -> bool {
        self.windows.read().iter().any(|attached| {
            attached
                .window
                .host()
                .selected()
                .is_some_and(|c| c.tab_name() == tab_name)
        })
    }

    /// All tabs matching the predicate, across every attached window and the
    /// pending buffer.
    pub fn find_contents(&self, predicate: impl Fn(&Content) -> bool) -> Vec<ContentRef> {
        let mut all: Vec<ContentRef> = Vec::new();
        for attached in self.windows.read().iter() {
            all.extend(attached.window.host().contents());
        }
        all.extend(self.pending.lock().iter().cloned());
        all.retain(|content| predicate(content));
        all
    }

    /// Payload of the first selected tab that downcasts to `T`.
    pub fn active_component<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.windows.read().iter().find_map(|attached| {
            attached
                .window
                .host()
                .selected()
                .and_then(|content| content.component::<T>())
        })
    }

    fn find_in_windows(&self, predicate: impl Fn(&Content) -> bool) -> Option<ContentRef> {
        self.windows.read().iter().find_map(|attached| {
            attached
                .window
                .host()
                .contents()
                .into_iter()
                .find(|content| predicate(content))
        })
    }

    /// Insert before the first existing tab whose weight strictly exceeds
    /// the new tab's, so equal weights keep arrival order.
    fn add_in_order(&self, window: &Arc<DockWindow>, content: ContentRef) {
        let host = window.host();
        let weight = content_weight(&content);

        let contents = host.contents();
        let index = contents
            .iter()
            .position(|existing| content_weight(existing) > weight)
            .unwrap_or(contents.len());

        match host.insert(index, Arc::clone(&content)) {
            Ok(()) => {
                tracing::debug!(
                    tab = %content.tab_name(),
                    window = %window.id(),
                    weight,
                    index,
                    "Placed tab"
                );
            }
            Err(DockError::HostDisposed) => {
                tracing::warn!(
                    tab = %content.tab_name(),
                    window = %window.id(),
                    "Window host already disposed, buffering tab"
                );
                self.pending.lock().push(content);
            }
            Err(error) => {
                tracing::warn!(tab = %content.tab_name(), %error, "Dropping misplaced tab");
            }
        }
    }
}

impl Drop for ContentRouter {
    fn drop(&mut self) {
        for content in self.pending.get_mut().drain(..) {
            content.dispose();
        }
        for attached in self.windows.get_mut().drain(..) {
            attached
                .window
                .host()
                .remove_selection_listener(attached.listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COMMIT_WINDOW_ID, SCM_WINDOW_ID};
    use crate::order::{BRANCHES, CHANGES, INCOMING, REPOSITORY, SHELF};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn names(window: &Arc<DockWindow>) -> Vec<String> {
        window
            .host()
            .contents()
            .iter()
            .map(|c| c.tab_name().to_string())
            .collect()
    }

    #[test]
    fn test_add_before_attach_buffers_then_drains() {
        let router = ContentRouter::new(RouterConfig::default());
        router.add_content(Content::new(CHANGES).into_ref());
        assert_eq!(router.find_contents(|_| true).len(), 1);

        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        assert_eq!(names(&window), vec![CHANGES]);
        // drained tab is counted once, out of the buffer
        assert_eq!(router.find_contents(|_| true).len(), 1);
    }

    #[test]
    fn test_weighted_placement_sorts() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        for weight in [40, 10, 100, 30] {
            router.add_content(
                Content::new(format!("tab-{weight}"))
                    .with_order_weight(weight)
                    .into_ref(),
            );
        }

        let weights: Vec<i32> = window
            .host()
            .contents()
            .iter()
            .map(|c| c.order_weight().unwrap())
            .collect();
        assert_eq!(weights, vec![10, 30, 40, 100]);
    }

    #[test]
    fn test_equal_weights_keep_arrival_order() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        router.add_content(Content::new("a").with_order_weight(10).into_ref());
        router.add_content(Content::new("b").with_order_weight(10).into_ref());

        assert_eq!(names(&window), vec!["a", "b"]);
    }

    #[test]
    fn test_well_known_tabs_group_in_fixed_order() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        for name in [BRANCHES, CHANGES, SHELF, REPOSITORY, INCOMING] {
            router.add_content(Content::new(name).into_ref());
        }
        router.add_content(Content::new("Console").into_ref());

        assert_eq!(
            names(&window),
            vec![CHANGES, REPOSITORY, INCOMING, SHELF, BRANCHES, "Console"]
        );
    }

    #[test]
    fn test_routing_splits_by_flag() {
        let router = ContentRouter::new(RouterConfig::new(true));
        let scm = DockWindow::new(SCM_WINDOW_ID);
        let commit = DockWindow::new(COMMIT_WINDOW_ID);
        router.attach_window(&scm);
        router.attach_window(&commit);

        for name in [CHANGES, REPOSITORY, SHELF, "Console"] {
            router.add_content(Content::new(name).into_ref());
        }

        assert_eq!(names(&commit), vec![CHANGES, SHELF]);
        assert_eq!(names(&scm), vec![REPOSITORY, "Console"]);
    }

    #[test]
    fn test_attach_drains_only_matching_tabs() {
        let router = ContentRouter::new(RouterConfig::new(true));
        router.add_content(Content::new(CHANGES).into_ref());
        router.add_content(Content::new(REPOSITORY).into_ref());

        let commit = DockWindow::new(COMMIT_WINDOW_ID);
        router.attach_window(&commit);

        assert_eq!(names(&commit), vec![CHANGES]);
        // the repository tab still waits for its own window
        assert_eq!(router.find_contents(|_| true).len(), 2);

        let scm = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&scm);
        assert_eq!(names(&scm), vec![REPOSITORY]);
    }

    #[test]
    fn test_flag_toggle_applies_to_next_add() {
        let router = ContentRouter::new(RouterConfig::default());
        let scm = DockWindow::new(SCM_WINDOW_ID);
        let commit = DockWindow::new(COMMIT_WINDOW_ID);
        router.attach_window(&scm);
        router.attach_window(&commit);

        router.add_content(Content::new(SHELF).into_ref());
        router.set_config(RouterConfig::new(true));
        router.add_content(Content::new(CHANGES).into_ref());

        // already-placed tabs are not moved
        assert_eq!(names(&scm), vec![SHELF]);
        assert_eq!(names(&commit), vec![CHANGES]);
        assert_eq!(router.window_id_for(SHELF), COMMIT_WINDOW_ID);
    }

    #[test]
    fn test_first_tab_selected_after_attach() {
        let router = ContentRouter::new(RouterConfig::default());
        router.add_content(Content::new(REPOSITORY).into_ref());
        router.add_content(Content::new(CHANGES).into_ref());

        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        assert!(router.is_content_selected(CHANGES));
        assert!(!router.is_content_selected(REPOSITORY));
    }

    #[test]
    fn test_initializer_runs_once_on_selection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        router.add_content(Content::new(CHANGES).into_ref());
        router.add_content(
            Content::new(SHELF)
                .with_initializer(move |content| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    content.set_component(Arc::new("shelf panel".to_string()));
                })
                .into_ref(),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        router.select_content(SHELF);
        assert!(router.is_content_selected(SHELF));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        router.select_content(CHANGES);
        router.select_content(SHELF);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_active_component_downcasts_selection() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        let content = Content::new(CHANGES).into_ref();
        content.set_component(Arc::new("changes panel".to_string()));
        router.add_content(Arc::clone(&content));
        router.set_selected_content(&content);

        assert_eq!(
            router.active_component::<String>().as_deref(),
            Some(&"changes panel".to_string())
        );
        assert!(router.active_component::<usize>().is_none());
    }

    #[test]
    fn test_remove_pending_tab_disposes_it() {
        let router = ContentRouter::new(RouterConfig::default());
        let content = Content::new(CHANGES).into_ref();
        router.add_content(Arc::clone(&content));

        router.remove_content(&content);

        assert!(content.is_disposed());
        assert!(router.find_contents(|_| true).is_empty());
    }

    #[test]
    fn test_remove_attached_tab_goes_through_host() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        let content = Content::new(CHANGES).into_ref();
        router.add_content(Arc::clone(&content));
        router.remove_content(&content);

        assert!(content.is_disposed());
        assert!(window.host().is_empty());
    }

    #[test]
    fn test_remove_after_host_teardown_falls_back_to_disposal() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        let content = Content::new(CHANGES).into_ref();
        router.add_content(Arc::clone(&content));
        window.host().dispose();

        router.remove_content(&content);
        assert!(content.is_disposed());
    }

    #[test]
    fn test_select_missing_name_is_noop() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);

        router.select_content("No Such Tab");
        assert!(!router.is_content_selected("No Such Tab"));
    }

    #[test]
    fn test_pending_tabs_never_selectable() {
        let router = ContentRouter::new(RouterConfig::default());
        router.add_content(Content::new(CHANGES).into_ref());

        router.select_content(CHANGES);
        assert!(!router.is_content_selected(CHANGES));
    }

    #[test]
    fn test_find_contents_spans_windows_and_buffer() {
        let router = ContentRouter::new(RouterConfig::new(true));
        let commit = DockWindow::new(COMMIT_WINDOW_ID);
        router.attach_window(&commit);

        router.add_content(Content::new(CHANGES).into_ref());
        router.add_content(Content::new(REPOSITORY).into_ref());

        let all = router.find_contents(|_| true);
        assert_eq!(all.len(), 2);
        let shelves = router.find_contents(|c| c.tab_name() == REPOSITORY);
        assert_eq!(shelves.len(), 1);
    }

    #[test]
    fn test_reattach_is_noop() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);
        router.attach_window(&window);

        router.add_content(Content::new(CHANGES).into_ref());
        assert_eq!(window.host().len(), 1);
    }

    #[test]
    fn test_detach_stops_routing() {
        let router = ContentRouter::new(RouterConfig::default());
        let window = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&window);
        router.detach_window(&window);

        router.add_content(Content::new(CHANGES).into_ref());
        assert!(window.host().is_empty());
        assert_eq!(router.find_contents(|_| true).len(), 1);
    }

    #[test]
    fn test_drop_disposes_pending_tabs() {
        let content = Content::new(CHANGES).into_ref();
        {
            let router = ContentRouter::new(RouterConfig::default());
            router.add_content(Arc::clone(&content));
        }
        assert!(content.is_disposed());
    }

    #[test]
    fn test_duplicate_window_id_keeps_first() {
        let router = ContentRouter::new(RouterConfig::default());
        let first = DockWindow::new(SCM_WINDOW_ID);
        let second = DockWindow::new(SCM_WINDOW_ID);
        router.attach_window(&first);
        router.attach_window(&second);

        router.add_content(Content::new(CHANGES).into_ref());
        assert_eq!(first.host().len(), 1);
        assert!(second.host().is_empty());
    }
}
