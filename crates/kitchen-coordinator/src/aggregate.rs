//! # Order Status Aggregation
//!
//! The pure fold that turns the statuses of an order's kitchen work items
//! into the order's externally visible status. Deterministic and
//! re-entrant: the result depends only on the snapshot it is given, never
//! on history, so recomputing is always safe.
//!
//! The single consumer that applies this fold lives in
//! [`crate::aggregator`].

use crate::model::{OrderStatus, WorkItemStatus};

/// Folds work-item statuses into an order status.
///
/// Cancelled items do not participate. Over the remaining set:
/// - empty → `None` (the order keeps its current pre-kitchen status)
/// - every item `Completed` → `Ready`
/// - any item `InProgress` → `Preparing`
/// - otherwise → `Confirmed`
pub fn aggregate_status(statuses: &[WorkItemStatus]) -> Option<OrderStatus> {
    let live: Vec<WorkItemStatus> = statuses
        .iter()
        .copied()
        .filter(|s| *s != WorkItemStatus::Cancelled)
        .collect();

    if live.is_empty() {
        None
    } else if live.iter().all(|s| *s == WorkItemStatus::Completed) {
        Some(OrderStatus::Ready)
    } else if live.iter().any(|s| *s == WorkItemStatus::InProgress) {
        Some(OrderStatus::Preparing)
    } else {
        Some(OrderStatus::Confirmed)
    }
}
