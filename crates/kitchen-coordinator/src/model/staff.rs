//! Staff references. Staff are owned by an external directory (see
//! [`crate::directory`]); the fulfillment domain only references them by ID
//! and role.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier for a kitchen staff member, issued by the external staff
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

impl StaffId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StaffId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Role of a staff member, as supplied by the auth collaborator.
///
/// Line staff operate only on work items assigned to themselves; shift
/// managers may reassign, override, and cancel across all staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    LineStaff,
    ShiftManager,
}

/// A staff member as reported by the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub active: bool,
}

impl Staff {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: StaffRole) -> Self {
        Self {
            id: StaffId::new(id),
            name: name.into(),
            role,
            active: true,
        }
    }
}

/// The authenticated caller of a coordinator operation.
///
/// Auth/session validation happens outside this crate; operations trust
/// the identity and role they are handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: StaffId,
    pub role: StaffRole,
}

impl Requester {
    pub fn line_staff(id: impl Into<String>) -> Self {
        Self {
            id: StaffId::new(id),
            role: StaffRole::LineStaff,
        }
    }

    pub fn shift_manager(id: impl Into<String>) -> Self {
        Self {
            id: StaffId::new(id),
            role: StaffRole::ShiftManager,
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role == StaffRole::ShiftManager
    }
}

/// One row of the workload snapshot: how many items in `{Assigned,
/// InProgress}` a staff member currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffWorkload {
    pub staff_id: StaffId,
    pub active_items: usize,
}
