//! Bridge and asset loading error types.

use thiserror::Error;

use quizmark_core::error::SessionError;

/// Errors that can occur while fetching a host asset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A local asset could not be read.
    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Errors returned by [`HostBridge`](crate::HostBridge) actions.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Host assets are still loading or failed to load. The session has not
    /// been started.
    #[error("quiz dependencies unavailable: {reason}")]
    DependencyUnavailable { reason: String },

    /// The session rejected the action; nothing changed.
    #[error(transparent)]
    Session(#[from] SessionError),
}
