//! The kitchen work item and its status state machine.
//!
//! A work item is one unit of kitchen-side work derived from an accepted
//! order. Its status only ever moves forward along
//! `Pending → Assigned → InProgress → Ready → Completed`, with `Cancelled`
//! reachable from any non-completed state. Both `Completed` and
//! `Cancelled` are terminal. Items are never deleted; cancellation is a
//! status, not a removal.
//!
//! Timestamp rules (enforced by [`WorkItem::apply_transition`]):
//! - `started_at` is set exactly once, on the first entry into
//!   `InProgress`.
//! - `completed_at` and `total_prep_minutes` are set exactly once, on the
//!   first entry into `Completed`; the total is the floor of the elapsed
//!   whole minutes, and stays 0 when the item completed without ever
//!   starting.

use crate::model::{OrderId, StaffId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog prep-time fallback (minutes) for lines without an estimate.
pub const DEFAULT_PREP_MINUTES: u32 = 15;

/// Type-safe identifier for kitchen work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkItemId(pub u32);

impl From<u32> for WorkItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for WorkItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Urgency tier driving staff attention order.
///
/// `Low` is never assigned automatically; it exists for manual manager
/// override only. The other tiers come from the priority calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

/// Status of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItemStatus {
    Pending,
    Assigned,
    InProgress,
    Ready,
    Completed,
    Cancelled,
}

impl WorkItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkItemStatus::Completed | WorkItemStatus::Cancelled)
    }

    /// Whether the item counts toward its assignee's workload.
    pub fn is_active(self) -> bool {
        matches!(self, WorkItemStatus::Assigned | WorkItemStatus::InProgress)
    }

    /// The allowed edge set: one step forward, or cancellation from any
    /// non-completed state. Same-status "transitions" are not edges; the
    /// actor treats them as idempotent no-ops so retries are harmless.
    pub fn can_transition_to(self, next: WorkItemStatus) -> bool {
        use WorkItemStatus::*;
        match (self, next) {
            (Pending, Assigned)
            | (Assigned, InProgress)
            | (InProgress, Ready)
            | (Ready, Completed) => true,
            (from, Cancelled) => !matches!(from, Completed | Cancelled),
            _ => false,
        }
    }
}

impl Display for WorkItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkItemStatus::Pending => "pending",
            WorkItemStatus::Assigned => "assigned",
            WorkItemStatus::InProgress => "in_progress",
            WorkItemStatus::Ready => "ready",
            WorkItemStatus::Completed => "completed",
            WorkItemStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Per-sub-item prep state, carried for staff displays. Completion is
/// tracked at the work-item level; there is no dish-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubItemStatus {
    Pending,
    Done,
}

/// One dish inside a work item, snapshotted from the order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub prep_minutes: u32,
    pub status: SubItemStatus,
    pub special_instructions: Option<String>,
}

/// One unit of kitchen-side fulfillment work for an order.
///
/// `order_number` and `customer_name` are denormalized from the order so
/// staff displays need no join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub sub_items: Vec<SubItem>,
    pub assigned_to: Option<StaffId>,
    pub priority: Priority,
    pub status: WorkItemStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Whole minutes between start and completion; 0 until completed, and
    /// 0 forever if the item completed without ever starting.
    pub total_prep_minutes: i64,
    pub notes: String,
}

/// Payload for deriving a work item from an accepted order.
#[derive(Debug, Clone)]
pub struct WorkItemCreate {
    pub order_id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub sub_items: Vec<SubItem>,
    pub priority: Priority,
}

/// Partial update for a work item; only notes are directly updatable,
/// everything else moves through commands.
#[derive(Debug, Clone, Default)]
pub struct WorkItemUpdate {
    pub notes: Option<String>,
}

/// Query shape for listing work items.
#[derive(Debug, Clone, Default)]
pub struct WorkItemFilter {
    pub order_id: Option<OrderId>,
    pub status: Option<WorkItemStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<StaffId>,
    /// Restrict to workload-counting states (`Assigned`, `InProgress`).
    pub active_only: bool,
}

impl WorkItemFilter {
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id: Some(order_id),
            ..Self::default()
        }
    }

    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }
}

impl WorkItem {
    pub fn new(id: WorkItemId, params: WorkItemCreate) -> Self {
        Self {
            id,
            order_id: params.order_id,
            order_number: params.order_number,
            customer_name: params.customer_name,
            sub_items: params.sub_items,
            assigned_to: None,
            priority: params.priority,
            status: WorkItemStatus::Pending,
            started_at: None,
            completed_at: None,
            total_prep_minutes: 0,
            notes: String::new(),
        }
    }

    /// Sum of catalog prep estimates over all sub-items, for display.
    pub fn estimated_prep_minutes(&self) -> u32 {
        self.sub_items
            .iter()
            .map(|s| s.prep_minutes * s.quantity)
            .sum()
    }

    /// Applies a validated status change plus its timestamp side effects.
    ///
    /// Callers are responsible for edge validation
    /// ([`WorkItemStatus::can_transition_to`]) and permission checks; this
    /// method only guarantees the exactly-once timestamp rules.
    pub fn apply_transition(&mut self, next: WorkItemStatus, now: DateTime<Utc>) {
        self.status = next;
        match next {
            WorkItemStatus::InProgress => {
                if self.started_at.is_none() {
                    self.started_at = Some(now);
                }
            }
            WorkItemStatus::Completed => {
                if self.completed_at.is_none() {
                    self.completed_at = Some(now);
                    self.total_prep_minutes = match self.started_at {
                        Some(started) => (now - started).num_minutes().max(0),
                        // Completed without ever starting: the total stays
                        // 0 rather than failing.
                        None => 0,
                    };
                }
            }
            _ => {}
        }
    }
}
