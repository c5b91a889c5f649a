//! # Work Item Client
//!
//! High-level API for the work-item actor: derivation (`derive`), the
//! role-gated command surface (`command`), and notes updates. `get` and
//! `list` come from the [`ActorClient`] trait.

use crate::model::{WorkItem, WorkItemCreate, WorkItemId, WorkItemUpdate};
use crate::work_item_actor::{WorkItemCommand, WorkItemError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the work-item actor.
#[derive(Clone)]
pub struct WorkItemClient {
    inner: ResourceClient<WorkItem>,
}

impl WorkItemClient {
    pub fn new(inner: ResourceClient<WorkItem>) -> Self {
        Self { inner }
    }

    /// Persists a newly derived work item.
    #[instrument(skip(self, params))]
    pub async fn derive(&self, params: WorkItemCreate) -> Result<WorkItemId, WorkItemError> {
        debug!(?params, "derive called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Executes a role-gated command and returns the item's new state.
    #[instrument(skip(self, command))]
    pub async fn command(
        &self,
        id: WorkItemId,
        command: WorkItemCommand,
    ) -> Result<WorkItem, WorkItemError> {
        debug!(?command, "command called");
        self.inner
            .perform_action(id, command)
            .await
            .map_err(Self::map_error)
    }

    /// Replaces the free-text notes without touching status.
    #[instrument(skip(self, notes))]
    pub async fn set_notes(
        &self,
        id: WorkItemId,
        notes: String,
    ) -> Result<WorkItem, WorkItemError> {
        self.inner
            .update(id, WorkItemUpdate { notes: Some(notes) })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<WorkItem> for WorkItemClient {
    type Error = WorkItemError;

    fn inner(&self) -> &ResourceClient<WorkItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => WorkItemError::NotFound(id),
            FrameworkError::EntityError(boxed) => match boxed.downcast::<WorkItemError>() {
                Ok(err) => *err,
                Err(other) => WorkItemError::ActorCommunication(other.to_string()),
            },
            other => WorkItemError::ActorCommunication(other.to_string()),
        }
    }
}
