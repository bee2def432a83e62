//! Content tab entity
//!
//! One user-visible tab hosted inside a dock window. The order weight and
//! the deferred initializer are plain fields on the struct; a tab belongs to
//! at most one host at a time, tracked through a weak backpointer.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::host::ContentHost;

/// Shared handle to a content tab.
pub type ContentRef = Arc<Content>;

/// One-shot deferred initializer, consumed on first selection.
pub type ContentInitializer = Box<dyn FnOnce(&Content) + Send>;

pub struct Content {
    /// Unique identifier
    id: String,
    /// Display name, also the routing and ordering key
    tab_name: String,
    /// Explicit override of the name-derived order weight
    order_weight: Option<i32>,
    /// The tab's payload, queryable by type
    component: RwLock<Option<Arc<dyn Any + Send + Sync>>>,
    /// Deferred payload populator, emptied once it has fired
    initializer: Mutex<Option<ContentInitializer>>,
    /// Host currently holding this tab, dangling while pending
    host: RwLock<Weak<ContentHost>>,
    disposed: AtomicBool,
}

impl Content {
    pub fn new(tab_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tab_name: tab_name.into(),
            order_weight: None,
            component: RwLock::new(None),
            initializer: Mutex::new(None),
            host: RwLock::new(Weak::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Pin this tab to an explicit sort weight.
    pub fn with_order_weight(mut self, weight: i32) -> Self {
        self.order_weight = Some(weight);
        self
    }

    /// Defer payload population until the tab is first selected.
    pub fn with_initializer(mut self, init: impl FnOnce(&Content) + Send + 'static) -> Self {
        self.initializer = Mutex::new(Some(Box::new(init)));
        self
    }

    pub fn into_ref(self) -> ContentRef {
        Arc::new(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tab_name(&self) -> &str {
        &self.tab_name
    }

    pub fn order_weight(&self) -> Option<i32> {
        self.order_weight
    }

    pub fn set_component(&self, component: Arc<dyn Any + Send + Sync>) {
        *self.component.write() = Some(component);
    }

    /// Downcast the tab's payload, if one is set.
    pub fn component<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let component = self.component.read().clone()?;
        component.downcast::<T>().ok()
    }

    pub fn has_initializer(&self) -> bool {
        self.initializer.lock().is_some()
    }

    /// Run the deferred initializer if it has not fired yet.
    ///
    /// The slot is emptied before the call, so selecting the tab again never
    /// fires it a second time.
    pub fn run_initializer(&self) {
        let init = self.initializer.lock().take();
        if let Some(init) = init {
            tracing::debug!(tab = %self.tab_name, "Initializing tab content");
            init(self);
        }
    }

    pub(crate) fn set_host(&self, host: Weak<ContentHost>) {
        *self.host.write() = host;
    }

    /// Host currently holding this tab, if it is attached and alive.
    pub fn host(&self) -> Option<Arc<ContentHost>> {
        self.host.read().upgrade()
    }

    /// Drop the payload and any pending initializer. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        *self.component.write() = None;
        *self.initializer.lock() = None;
        *self.host.write() = Weak::new();
        tracing::debug!(tab = %self.tab_name, "Disposed tab content");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Content")
            .field("id", &self.id)
            .field("tab_name", &self.tab_name)
            .field("order_weight", &self.order_weight)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
