//! # Event Error Types
//!
//! Errors reported by event handlers.

use thiserror::Error;

use crate::kind::EventKind;

/// An event handler failed.
///
/// Handler failures never propagate out of dispatch: they are logged and
/// collected into the dispatch report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The event did not carry the payload the handler expects.
    #[error("{kind} event is missing its {expected} payload")]
    InvalidPayload {
        /// Kind of the offending event.
        kind: EventKind,
        /// What the handler looked for.
        expected: &'static str,
    },

    /// The handler referred to something that no longer exists.
    #[error("stale reference: {0}")]
    Stale(String),

    /// Any other failure.
    #[error("handler failed: {0}")]
    Failed(String),
}

impl HandlerError {
    /// Convenience constructor for ad-hoc failures.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Result type for event handlers.
pub type HandlerResult = Result<(), HandlerError>;
