//! Error types for the work-item actor.

use crate::model::WorkItemStatus;
use thiserror::Error;

/// Errors that can occur during work-item operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkItemError {
    /// The requested work item was not found.
    #[error("Work item not found: {0}")]
    NotFound(String),

    /// The item is not in a state that allows the operation.
    #[error("Work item conflict: {0}")]
    Conflict(String),

    /// The requester's role or identity does not satisfy a guard.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The requested status is not reachable from the current one.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: WorkItemStatus,
        to: WorkItemStatus,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for WorkItemError {
    fn from(msg: String) -> Self {
        WorkItemError::ActorCommunication(msg)
    }
}
