//! Content host
//!
//! Ordered tab list with a current selection and selection listeners. The
//! host owns the tabs it holds; removing a tab can dispose it, and disposing
//! the host disposes every remaining tab.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::content::ContentRef;
use crate::error::DockError;
use crate::Result;

/// Handle for unregistering a selection listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Fired after the host's selection actually changed.
pub struct SelectionEvent {
    pub content: ContentRef,
}

type SelectionListener = Arc<dyn Fn(&SelectionEvent) + Send + Sync>;

pub struct ContentHost {
    contents: RwLock<Vec<ContentRef>>,
    selected: RwLock<Option<ContentRef>>,
    listeners: Mutex<Vec<(ListenerId, SelectionListener)>>,
    next_listener_id: AtomicU64,
    disposed: AtomicBool,
}

impl ContentHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            contents: RwLock::new(Vec::new()),
            selected: RwLock::new(None),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        })
    }

    /// Snapshot of the current tab list, in display order.
    pub fn contents(&self) -> Vec<ContentRef> {
        self.contents.read().clone()
    }

    pub fn len(&self) -> usize {
        self.contents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.read().is_empty()
    }

    /// Insert a tab at the given index (clamped to the list length).
    ///
    /// A tab can only live in one host; inserting a tab that is still held
    /// elsewhere is an error.
    pub fn insert(self: &Arc<Self>, index: usize, content: ContentRef) -> Result<()> {
        if self.is_disposed() {
            return Err(DockError::HostDisposed);
        }
        if content.host().is_some() {
            return Err(DockError::AlreadyAttached(content.tab_name().to_string()));
        }

        let mut contents = self.contents.write();
        let index = index.min(contents.len());
        content.set_host(Arc::downgrade(self));
        contents.insert(index, content);
        Ok(())
    }

    /// Remove a tab, optionally disposing it.
    ///
    /// If the removed tab was selected, selection moves to the nearest
    /// remaining neighbor. Returns false when the tab is not in this host.
    pub fn remove(&self, content: &ContentRef, dispose: bool) -> bool {
        let next = {
            let mut contents = self.contents.write();
            let Some(index) = contents.iter().position(|c| Arc::ptr_eq(c, content)) else {
                return false;
            };
            contents.remove(index);
            content.set_host(Weak::new());
            if contents.is_empty() {
                None
            } else {
                Some(contents[index.min(contents.len() - 1)].clone())
            }
        };

        let was_selected = {
            let mut selected = self.selected.write();
            if selected.as_ref().is_some_and(|c| Arc::ptr_eq(c, content)) {
                *selected = None;
                true
            } else {
                false
            }
        };

        if dispose {
            content.dispose();
        }
        if was_selected {
            if let Some(next) = next {
                self.select(&next);
            }
        }
        true
    }

    /// Select a tab held by this host; no-op for foreign tabs or when the
    /// selection would not change. Listeners fire outside the selection lock.
    pub fn select(&self, content: &ContentRef) {
        if self.is_disposed() {
            return;
        }
        {
            let contents = self.contents.read();
            if !contents.iter().any(|c| Arc::ptr_eq(c, content)) {
                return;
            }
        }
        {
            let mut selected = self.selected.write();
            if selected.as_ref().is_some_and(|c| Arc::ptr_eq(c, content)) {
                return;
            }
            *selected = Some(Arc::clone(content));
        }
        self.notify(&SelectionEvent {
            content: Arc::clone(content),
        });
    }

    pub fn selected(&self) -> Option<ContentRef> {
        self.selected.read().clone()
    }

    pub fn add_selection_listener(
        &self,
        listener: impl Fn(&SelectionEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::SeqCst));
        let listener: SelectionListener = Arc::new(listener);
        self.listeners.lock().push((id, listener));
        id
    }

    pub fn remove_selection_listener(&self, id: ListenerId) {
        self.listeners.lock().retain(|(listener_id, _)| *listener_id != id);
    }

    // Snapshot first: a listener may re-enter the host and register or
    // remove listeners while we dispatch.
    fn notify(&self, event: &SelectionEvent) {
        let listeners: Vec<SelectionListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Tear down the host: dispose every remaining tab, drop the selection
    /// and the listeners. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let contents = std::mem::take(&mut *self.contents.write());
        for content in &contents {
            content.dispose();
        }
        *self.selected.write() = None;
        self.listeners.lock().clear();
        tracing::debug!(tabs = contents.len(), "Disposed content host");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
