//! Atrium Dock Primitives
//!
//! A dock window hosts an ordered list of content tabs and tracks which one
//! is selected. Higher layers decide which window a tab belongs to; this
//! crate only knows how to hold, order and select tabs and how to notify
//! listeners when the selection moves.

mod content;
mod error;
mod host;
mod window;

pub use content::{Content, ContentInitializer, ContentRef};
pub use error::DockError;
pub use host::{ContentHost, ListenerId, SelectionEvent};
pub use window::DockWindow;

pub type Result<T> = std::result::Result<T, DockError>;
