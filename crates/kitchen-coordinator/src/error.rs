//! # Fulfillment Error Taxonomy
//!
//! The coordinator-level error surface. Every variant carries a stable
//! machine-readable kind (see [`FulfillmentError::kind`]) plus a
//! human-readable message, so an HTTP layer can map them mechanically
//! (404 / 409 / 403 / 400 / 503). Actor-level errors
//! ([`WorkItemError`](crate::work_item_actor::WorkItemError),
//! [`OrderError`](crate::order_actor::OrderError)) convert in losslessly.
//!
//! Validation always precedes any write, so a returned error implies no
//! partial state was persisted. The one swallowed category, notification
//! failures, never surfaces here at all; it is logged by the aggregator.

use crate::model::WorkItemStatus;
use crate::order_actor::OrderError;
use crate::work_item_actor::WorkItemError;
use thiserror::Error;

/// Errors surfaced by the fulfillment coordinator's operations.
#[derive(Debug, Error, PartialEq)]
pub enum FulfillmentError {
    /// Referenced order or work item does not exist. 404-equivalent; do
    /// not retry.
    #[error("not found: {0}")]
    NotFound(String),

    /// The entity is not in a state that allows the operation (e.g.
    /// re-deriving when a work item already exists). 409-equivalent; do
    /// not retry automatically.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Requester role/identity does not satisfy a guard. 403-equivalent.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Requested status is not reachable from the current status.
    /// 400-equivalent, with the offending pair in the message.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: WorkItemStatus,
        to: WorkItemStatus,
    },

    /// Auto-assignment found zero active eligible staff. 503-equivalent:
    /// a transient operational condition, safe to retry once staffing
    /// changes.
    #[error("no available staff for assignment")]
    NoAvailableStaff,

    /// Actor channel failure; the system is shutting down or overloaded.
    #[error("actor communication error: {0}")]
    Actor(String),
}

impl FulfillmentError {
    /// Stable machine-readable kind for wire mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            FulfillmentError::NotFound(_) => "not_found",
            FulfillmentError::Conflict(_) => "conflict",
            FulfillmentError::PermissionDenied(_) => "permission_denied",
            FulfillmentError::InvalidTransition { .. } => "invalid_transition",
            FulfillmentError::NoAvailableStaff => "no_available_staff",
            FulfillmentError::Actor(_) => "actor_error",
        }
    }
}

impl From<WorkItemError> for FulfillmentError {
    fn from(e: WorkItemError) -> Self {
        match e {
            WorkItemError::NotFound(id) => FulfillmentError::NotFound(id),
            WorkItemError::Conflict(msg) => FulfillmentError::Conflict(msg),
            WorkItemError::PermissionDenied(msg) => FulfillmentError::PermissionDenied(msg),
            WorkItemError::InvalidTransition { from, to } => {
                FulfillmentError::InvalidTransition { from, to }
            }
            WorkItemError::ActorCommunication(msg) => FulfillmentError::Actor(msg),
        }
    }
}

impl From<OrderError> for FulfillmentError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => FulfillmentError::NotFound(id),
            OrderError::Validation(msg) => FulfillmentError::Conflict(msg),
            OrderError::ActorCommunication(msg) => FulfillmentError::Actor(msg),
        }
    }
}
