//! Role-gated commands on a work item.
//!
//! The update surface is split into two explicit command types validated at
//! the boundary rather than one request whose honored fields depend on the
//! caller's role at runtime. A line-staff caller can only ever construct a
//! [`StaffCommand`]; everything a shift manager may additionally touch
//! (assignee, priority, cancellation, other people's items) lives in
//! [`ManagerCommand`].

use crate::model::{Priority, StaffId, WorkItemStatus};

/// A command against a single work item, tagged by the authority it was
/// issued under.
#[derive(Debug, Clone)]
pub enum WorkItemCommand {
    Staff(StaffCommand),
    Manager(ManagerCommand),
}

/// What line staff may do: operate on items assigned to themselves.
#[derive(Debug, Clone)]
pub enum StaffCommand {
    /// Move own item along the status machine, optionally replacing notes.
    Transition {
        requester: StaffId,
        new_status: WorkItemStatus,
        notes: Option<String>,
    },
    /// Self-accept an unassigned pending item.
    Accept { requester: StaffId },
}

/// What shift managers may do: any item, plus assignment and priority
/// overrides.
#[derive(Debug, Clone)]
pub enum ManagerCommand {
    /// Move any item along the status machine, optionally replacing notes.
    Transition {
        new_status: WorkItemStatus,
        notes: Option<String>,
    },
    /// Bind the item to a staff member. A `Pending` item becomes
    /// `Assigned`; an item already underway keeps its status (reassignment
    /// does not reset progress).
    Assign { staff_id: StaffId },
    /// Manual urgency override, including the `Low` tier the calculator
    /// never produces.
    SetPriority(Priority),
    /// Terminal cancellation. Idempotent; rejected only on a completed
    /// item.
    Cancel,
}
