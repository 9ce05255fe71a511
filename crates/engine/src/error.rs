//! Engine and client errors.

use thiserror::Error;

use crate::core::GridError;

/// Errors surfaced by the step engine or the channel between host and engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request is already in flight; wait for its reply first.
    #[error("a request is already in flight")]
    Busy,

    /// The engine task has stopped and its channels are closed.
    #[error("engine worker has shut down")]
    Disconnected,

    /// `step` or `toggle` arrived before any `init`.
    #[error("engine has not been initialized")]
    NotInitialized,

    /// The `init` payload was rejected.
    #[error("invalid init payload: {0}")]
    InvalidInit(#[from] GridError),

    /// The dedicated runtime could not be created.
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl EngineError {
    /// Stable machine-readable code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Busy => "busy",
            EngineError::Disconnected => "disconnected",
            EngineError::NotInitialized => "not_initialized",
            EngineError::InvalidInit(_) => "invalid_init",
            EngineError::Runtime(_) => "runtime",
        }
    }
}
