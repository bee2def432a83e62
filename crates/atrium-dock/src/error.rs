//! Dock error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockError {
    #[error("Content host is disposed")]
    HostDisposed,

    #[error("Content is already attached to a host: {0}")]
    AlreadyAttached(String),
}
