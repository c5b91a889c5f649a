//! Entity trait implementation for the work item.
//!
//! All guard rules of the status state machine live here, inside
//! `handle_action`, so they run under the actor's single-writer loop: two
//! nearly-simultaneous commands against the same item are queued, never
//! interleaved, and the loser of the race sees the winner's state. Combined
//! with the actor's commit-on-success rule this gives the
//! no-partial-state-on-failure guarantee for free.

use crate::model::{
    WorkItem, WorkItemCreate, WorkItemFilter, WorkItemStatus, WorkItemUpdate,
};
use crate::work_item_actor::{ManagerCommand, StaffCommand, WorkItemCommand, WorkItemError};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

impl WorkItem {
    /// Shared transition path for staff and manager commands. Permission
    /// checks happen before this is called.
    fn transition(
        &mut self,
        new_status: WorkItemStatus,
        notes: Option<String>,
    ) -> Result<(), WorkItemError> {
        if new_status == self.status {
            // Idempotent repeat (e.g. a retried "completed" call): no edge
            // is taken and timestamps stay as they are.
            if let Some(notes) = notes {
                self.notes = notes;
            }
            return Ok(());
        }
        if !self.status.can_transition_to(new_status) {
            return Err(WorkItemError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }
        self.apply_transition(new_status, Utc::now());
        if let Some(notes) = notes {
            self.notes = notes;
        }
        Ok(())
    }

    fn assign(&mut self, staff_id: crate::model::StaffId) -> Result<(), WorkItemError> {
        if self.status.is_terminal() {
            return Err(WorkItemError::Conflict(format!(
                "{} is {} and cannot be assigned",
                self.id, self.status
            )));
        }
        if self.assigned_to.as_ref() == Some(&staff_id) {
            return Ok(());
        }
        self.assigned_to = Some(staff_id);
        if self.status == WorkItemStatus::Pending {
            self.apply_transition(WorkItemStatus::Assigned, Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for WorkItem {
    type Id = crate::model::WorkItemId;
    type Create = WorkItemCreate;
    type Update = WorkItemUpdate;
    type Action = WorkItemCommand;
    type ActionResult = WorkItem;
    type Filter = WorkItemFilter;
    type Context = ();
    type Error = WorkItemError;

    fn from_create_params(id: Self::Id, params: WorkItemCreate) -> Result<Self, Self::Error> {
        Ok(WorkItem::new(id, params))
    }

    fn matches(&self, filter: &WorkItemFilter) -> bool {
        if let Some(order_id) = filter.order_id {
            if self.order_id != order_id {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if self.status != status {
                return false;
            }
        }
        if let Some(priority) = filter.priority {
            if self.priority != priority {
                return false;
            }
        }
        if let Some(assigned_to) = &filter.assigned_to {
            if self.assigned_to.as_ref() != Some(assigned_to) {
                return false;
            }
        }
        if filter.active_only && !self.status.is_active() {
            return false;
        }
        true
    }

    async fn on_update(&mut self, update: WorkItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        command: WorkItemCommand,
        _ctx: &(),
    ) -> Result<WorkItem, Self::Error> {
        match command {
            WorkItemCommand::Staff(cmd) => match cmd {
                StaffCommand::Transition {
                    requester,
                    new_status,
                    notes,
                } => {
                    if self.assigned_to.as_ref() != Some(&requester) {
                        return Err(WorkItemError::PermissionDenied(format!(
                            "{requester} is not assigned to {}",
                            self.id
                        )));
                    }
                    self.transition(new_status, notes)?;
                }
                StaffCommand::Accept { requester } => match &self.assigned_to {
                    Some(owner) if *owner == requester => {}
                    Some(owner) => {
                        return Err(WorkItemError::PermissionDenied(format!(
                            "{} is already assigned to {owner}",
                            self.id
                        )));
                    }
                    None => {
                        if self.status != WorkItemStatus::Pending {
                            return Err(WorkItemError::Conflict(format!(
                                "{} is {} and cannot be accepted",
                                self.id, self.status
                            )));
                        }
                        self.assign(requester)?;
                    }
                },
            },
            WorkItemCommand::Manager(cmd) => match cmd {
                ManagerCommand::Transition { new_status, notes } => {
                    self.transition(new_status, notes)?;
                }
                ManagerCommand::Assign { staff_id } => {
                    self.assign(staff_id)?;
                }
                ManagerCommand::SetPriority(priority) => {
                    self.priority = priority;
                }
                ManagerCommand::Cancel => {
                    self.transition(WorkItemStatus::Cancelled, None)?;
                }
            },
        }
        Ok(self.clone())
    }
}
