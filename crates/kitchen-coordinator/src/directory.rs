//! # Staff Directory (external collaborator)
//!
//! Staff identities, roles, and the active flag live outside this
//! subsystem. The coordinator only needs one question answered (who is
//! active in which roles), so that is the whole trait. The in-memory
//! implementation backs the demo binary and the test suites.

use crate::model::{Staff, StaffRole};
use async_trait::async_trait;
use std::sync::Mutex;

/// Read access to the externally owned staff roster.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Active staff members holding any of `roles`, in the directory's
    /// stable order. That order is also the auto-assign tiebreak, so
    /// implementations should keep it deterministic.
    async fn list_active_staff(&self, roles: &[StaffRole]) -> Vec<Staff>;
}

/// A simple in-process roster.
#[derive(Default)]
pub struct InMemoryStaffDirectory {
    staff: Mutex<Vec<Staff>>,
}

impl InMemoryStaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_staff(staff: Vec<Staff>) -> Self {
        Self {
            staff: Mutex::new(staff),
        }
    }

    pub fn add(&self, staff: Staff) {
        self.staff.lock().unwrap().push(staff);
    }

    /// Flips a staff member's active flag, e.g. at shift end.
    pub fn set_active(&self, id: &crate::model::StaffId, active: bool) {
        let mut staff = self.staff.lock().unwrap();
        if let Some(member) = staff.iter_mut().find(|s| &s.id == id) {
            member.active = active;
        }
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStaffDirectory {
    async fn list_active_staff(&self, roles: &[StaffRole]) -> Vec<Staff> {
        self.staff
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.active && roles.contains(&s.role))
            .cloned()
            .collect()
    }
}
