//! # Assignment Engine (auto-balancing half)
//!
//! The least-loaded pick behind auto-assignment. Manual assignment and
//! self-acceptance are commands on the work-item actor; this module only
//! decides *who* gets an item when nobody was named.

use crate::model::{Staff, StaffId, StaffWorkload, WorkItem};
use std::collections::HashMap;

/// Counts active items (`Assigned`, `InProgress`) per assignee.
///
/// `active_items` is expected to already be filtered to active statuses;
/// unassigned items are skipped.
pub fn workload_by_staff(active_items: &[WorkItem]) -> HashMap<StaffId, usize> {
    let mut counts = HashMap::new();
    for item in active_items {
        if let Some(staff_id) = &item.assigned_to {
            *counts.entry(staff_id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Builds the workload snapshot rows in the directory's staff order.
pub fn workload_snapshot(staff: &[Staff], active_items: &[WorkItem]) -> Vec<StaffWorkload> {
    let counts = workload_by_staff(active_items);
    staff
        .iter()
        .map(|s| StaffWorkload {
            staff_id: s.id.clone(),
            active_items: counts.get(&s.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Picks the staff member with the strictly lowest workload.
///
/// Ties are broken by input order: the first staff member at the minimum
/// wins. There is no secondary key such as last-assigned-time, so the
/// policy is simple but not fairness-optimal. Returns `None` when `staff`
/// is empty.
pub fn pick_least_loaded<'a>(
    staff: &'a [Staff],
    workloads: &HashMap<StaffId, usize>,
) -> Option<&'a Staff> {
    let mut best: Option<(&Staff, usize)> = None;
    for candidate in staff {
        let load = workloads.get(&candidate.id).copied().unwrap_or(0);
        match best {
            Some((_, best_load)) if load >= best_load => {}
            _ => best = Some((candidate, load)),
        }
    }
    best.map(|(staff, _)| staff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StaffRole;

    fn roster(ids: &[&str]) -> Vec<Staff> {
        ids.iter()
            .map(|id| Staff::new(*id, *id, StaffRole::LineStaff))
            .collect()
    }

    fn loads(pairs: &[(&str, usize)]) -> HashMap<StaffId, usize> {
        pairs
            .iter()
            .map(|(id, n)| (StaffId::new(*id), *n))
            .collect()
    }

    #[test]
    fn picks_strictly_lowest_workload() {
        let staff = roster(&["a", "b", "c", "d"]);
        let workloads = loads(&[("a", 2), ("b", 0), ("c", 3), ("d", 1)]);
        let picked = pick_least_loaded(&staff, &workloads).unwrap();
        assert_eq!(picked.id, StaffId::new("b"));
    }

    #[test]
    fn tie_goes_to_first_encountered() {
        let staff = roster(&["a", "b", "c"]);
        let workloads = loads(&[("a", 1), ("b", 1), ("c", 1)]);
        let picked = pick_least_loaded(&staff, &workloads).unwrap();
        assert_eq!(picked.id, StaffId::new("a"));
    }

    #[test]
    fn missing_workload_counts_as_zero() {
        let staff = roster(&["a", "b"]);
        let workloads = loads(&[("a", 1)]);
        let picked = pick_least_loaded(&staff, &workloads).unwrap();
        assert_eq!(picked.id, StaffId::new("b"));
    }

    #[test]
    fn empty_roster_yields_none() {
        let workloads = loads(&[]);
        assert!(pick_least_loaded(&[], &workloads).is_none());
    }
}
