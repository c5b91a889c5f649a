//! # Work Item Actor
//!
//! The resource actor owning all kitchen work items. Beyond CRUD it
//! answers [`WorkItemCommand`]s, the role-gated operations of the status
//! state machine and the assignment engine's binding step.
//!
//! ## Structure
//!
//! - **[`commands`]**: [`StaffCommand`] / [`ManagerCommand`], the
//!   tagged-by-authority update surface
//! - **[`entity`]**: [`ActorEntity`](resource_actor::ActorEntity)
//!   implementation for [`WorkItem`], where guards and timestamp side
//!   effects are enforced
//! - **[`error`]**: [`WorkItemError`]
//! - **[`new()`]**: factory for the actor and its generic client

pub mod commands;
pub mod entity;
pub mod error;

pub use commands::*;
pub use error::*;

use crate::model::WorkItem;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new work-item actor and its client.
pub fn new() -> (ResourceActor<WorkItem>, ResourceClient<WorkItem>) {
    ResourceActor::new(32)
}
