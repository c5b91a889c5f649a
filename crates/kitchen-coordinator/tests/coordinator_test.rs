//! Full end-to-end scenarios with all real actors, the real aggregator,
//! and an in-process staff directory.

use async_trait::async_trait;
use chrono::Utc;
use kitchen_coordinator::directory::InMemoryStaffDirectory;
use kitchen_coordinator::error::FulfillmentError;
use kitchen_coordinator::lifecycle::KitchenSystem;
use kitchen_coordinator::model::{
    DeliveryDetails, Order, OrderCreate, OrderId, OrderLine, OrderStatus, PaymentState, Requester,
    Staff, StaffId, StaffRole, WorkItemFilter, WorkItemStatus,
};
use kitchen_coordinator::notify::{LogNotifier, Notifier, NotifyError};
use resource_actor::{ActorClient, Page};
use std::sync::{Arc, Mutex};

/// Captures every ready notification for assertions.
struct RecordingNotifier {
    ready: Mutex<Vec<OrderId>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            ready: Mutex::new(Vec::new()),
        }
    }

    fn ready_orders(&self) -> Vec<OrderId> {
        self.ready.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_order_ready(&self, order: &Order) -> Result<(), NotifyError> {
        self.ready.lock().unwrap().push(order.id);
        Ok(())
    }
}

/// Mara (shift manager) plus two line staff, in directory order.
fn kitchen_roster() -> Arc<InMemoryStaffDirectory> {
    Arc::new(InMemoryStaffDirectory::with_staff(vec![
        Staff::new("mara", "Mara", StaffRole::ShiftManager),
        Staff::new("ana", "Ana", StaffRole::LineStaff),
        Staff::new("bo", "Bo", StaffRole::LineStaff),
    ]))
}

fn order_params(number: &str) -> OrderCreate {
    OrderCreate {
        order_number: number.to_string(),
        customer_name: "Dana".to_string(),
        lines: vec![
            OrderLine {
                menu_item_id: "burger".to_string(),
                name: "Burger".to_string(),
                unit_price_cents: 950,
                quantity: 2,
                prep_minutes: Some(12),
                special_instructions: Some("no onions".to_string()),
            },
            OrderLine {
                menu_item_id: "fries".to_string(),
                name: "Fries".to_string(),
                unit_price_cents: 350,
                quantity: 1,
                prep_minutes: None,
                special_instructions: None,
            },
        ],
        delivery: DeliveryDetails::Pickup,
        payment: PaymentState::Paid,
        placed_at: Utc::now(),
    }
}

#[tokio::test]
async fn full_lifecycle_from_placement_to_ready() {
    let notifier = Arc::new(RecordingNotifier::new());
    let system = KitchenSystem::new(kitchen_roster(), notifier.clone());
    let manager = Requester::shift_manager("mara");

    let order_id = system
        .orders
        .place(order_params("R-1001"))
        .await
        .expect("Failed to place order");

    // Accept with explicit assignment to Ana.
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .expect("Failed to accept order");
    assert_eq!(item.status, WorkItemStatus::Assigned);
    assert_eq!(item.assigned_to, Some(StaffId::new("ana")));
    assert_eq!(item.order_number, "R-1001");
    // The missing catalog estimate fell back to the default.
    assert_eq!(item.sub_items.len(), 2);
    assert_eq!(item.sub_items[1].prep_minutes, 15);
    // 2x burger at 12 plus 1x fries at the 15-minute fallback.
    assert_eq!(item.estimated_prep_minutes(), 39);

    // Acceptance confirmed and linked the order.
    let order = system
        .orders
        .get(order_id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.work_item, Some(item.id));
    assert_eq!(order.assigned_staff, Some(StaffId::new("ana")));

    // Ana cooks. Each transition is reflected in the order status before
    // the call returns.
    let ana = Requester::line_staff("ana");
    system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::InProgress, None, &ana)
        .await
        .expect("Failed to start preparation");
    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);

    system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Ready, None, &ana)
        .await
        .expect("Failed to plate");
    system
        .coordinator
        .update_work_item_status(
            item.id,
            WorkItemStatus::Completed,
            Some("handed to counter".to_string()),
            &ana,
        )
        .await
        .expect("Failed to complete");

    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Ready);

    let item = system
        .work_items
        .get(item.id)
        .await
        .expect("Failed to get work item")
        .expect("Work item not found");
    assert_eq!(item.status, WorkItemStatus::Completed);
    assert_eq!(item.notes, "handed to counter");
    assert!(item.started_at.is_some());
    assert!(item.completed_at.is_some());

    // The customer was told exactly once.
    assert_eq!(notifier.ready_orders(), vec![order_id]);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn auto_assignment_balances_workload() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    // Three orders, three staff at zero load: round-robins through the
    // roster in directory order.
    let mut assignees = Vec::new();
    for number in ["R-1", "R-2", "R-3"] {
        let order_id = system.orders.place(order_params(number)).await.unwrap();
        let item = system
            .coordinator
            .accept_order(order_id, None, &manager)
            .await
            .expect("Failed to accept order");
        assignees.push(item.assigned_to.clone().unwrap());
    }
    assert_eq!(
        assignees,
        vec![StaffId::new("mara"), StaffId::new("ana"), StaffId::new("bo")]
    );

    let snapshot = system
        .coordinator
        .workload_snapshot(&manager)
        .await
        .expect("Failed to read workload");
    assert!(snapshot.iter().all(|w| w.active_items == 1));

    // A fourth order wraps around to the first roster entry.
    let order_id = system.orders.place(order_params("R-4")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, None, &manager)
        .await
        .unwrap();
    assert_eq!(item.assigned_to, Some(StaffId::new("mara")));

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn line_staff_see_only_their_own_items() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    for (number, staff) in [("R-1", "ana"), ("R-2", "bo"), ("R-3", "ana")] {
        let order_id = system.orders.place(order_params(number)).await.unwrap();
        system
            .coordinator
            .accept_order(order_id, Some(StaffId::new(staff)), &manager)
            .await
            .expect("Failed to accept order");
    }

    let ana = Requester::line_staff("ana");
    let mine = system
        .coordinator
        .list_work_items(WorkItemFilter::default(), Page::all(), &ana)
        .await
        .expect("Failed to list");
    assert_eq!(mine.len(), 2);
    assert!(mine
        .iter()
        .all(|item| item.assigned_to == Some(StaffId::new("ana"))));

    // Even an explicit filter for someone else's items is overridden.
    let filter = WorkItemFilter {
        assigned_to: Some(StaffId::new("bo")),
        ..WorkItemFilter::default()
    };
    let still_mine = system
        .coordinator
        .list_work_items(filter, Page::all(), &ana)
        .await
        .unwrap();
    assert_eq!(still_mine.len(), 2);

    let all = system
        .coordinator
        .list_work_items(WorkItemFilter::default(), Page::all(), &manager)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn staff_cannot_move_items_they_do_not_own() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();

    let bo = Requester::line_staff("bo");
    let err = system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::InProgress, None, &bo)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "permission_denied");

    // The denied attempt changed nothing.
    let unchanged = system.work_items.get(item.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, WorkItemStatus::Assigned);

    // The actual assignee may proceed, and a manager may always step in.
    let ana = Requester::line_staff("ana");
    system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::InProgress, None, &ana)
        .await
        .expect("Assignee should be allowed");
    system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Ready, None, &manager)
        .await
        .expect("Manager should be allowed");

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn repeated_completion_is_idempotent() {
    let notifier = Arc::new(RecordingNotifier::new());
    let system = KitchenSystem::new(kitchen_roster(), notifier.clone());
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();

    let ana = Requester::line_staff("ana");
    for status in [
        WorkItemStatus::InProgress,
        WorkItemStatus::Ready,
        WorkItemStatus::Completed,
    ] {
        system
            .coordinator
            .update_work_item_status(item.id, status, None, &ana)
            .await
            .unwrap();
    }
    let first = system.work_items.get(item.id).await.unwrap().unwrap();

    // A retried completion succeeds without taking an edge.
    let second = system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Completed, None, &ana)
        .await
        .expect("Retry should be a no-op success");
    assert_eq!(second.completed_at, first.completed_at);
    assert_eq!(second.total_prep_minutes, first.total_prep_minutes);

    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Ready);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn cancellation_is_manager_only_and_unwinds_the_order() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();

    let ana = Requester::line_staff("ana");
    let err = system
        .coordinator
        .cancel_work_item(item.id, &ana)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "permission_denied");

    system
        .coordinator
        .cancel_work_item(item.id, &manager)
        .await
        .expect("Manager cancel should succeed");

    let item = system.work_items.get(item.id).await.unwrap().unwrap();
    assert_eq!(item.status, WorkItemStatus::Cancelled);

    // With every item cancelled the fold yields nothing, so the order
    // keeps its last kitchen status.
    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn reassignment_preserves_progress() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();

    let ana = Requester::line_staff("ana");
    let started = system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::InProgress, None, &ana)
        .await
        .unwrap();

    let reassigned = system
        .coordinator
        .reassign_work_item(item.id, StaffId::new("bo"), &manager)
        .await
        .expect("Failed to reassign");
    assert_eq!(reassigned.assigned_to, Some(StaffId::new("bo")));
    assert_eq!(reassigned.status, WorkItemStatus::InProgress);
    assert_eq!(reassigned.started_at, started.started_at);

    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.assigned_staff, Some(StaffId::new("bo")));

    // Ownership moved with the item.
    let err = system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Ready, None, &ana)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "permission_denied");
    let bo = Requester::line_staff("bo");
    system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Ready, None, &bo)
        .await
        .expect("New assignee should be allowed");

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn acceptance_needs_available_staff() {
    let system = KitchenSystem::new(
        Arc::new(InMemoryStaffDirectory::new()),
        Arc::new(LogNotifier),
    );
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let err = system
        .coordinator
        .accept_order(order_id, None, &manager)
        .await
        .unwrap_err();
    assert_eq!(err, FulfillmentError::NoAvailableStaff);

    // Nothing was derived and the order is untouched.
    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Placed);
    assert!(order.work_item.is_none());

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn second_acceptance_is_a_conflict() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    system
        .coordinator
        .accept_order(order_id, None, &manager)
        .await
        .unwrap();

    let err = system
        .coordinator
        .accept_order(order_id, None, &manager)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "conflict");

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn line_staff_may_self_assign_on_acceptance() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let ana = Requester::line_staff("ana");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &ana)
        .await
        .expect("Self-assignment should be allowed");
    assert_eq!(item.assigned_to, Some(StaffId::new("ana")));
    assert_eq!(item.status, WorkItemStatus::Assigned);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn skipping_states_is_rejected() {
    let system = KitchenSystem::new(kitchen_roster(), Arc::new(LogNotifier));
    let manager = Requester::shift_manager("mara");

    let order_id = system.orders.place(order_params("R-1")).await.unwrap();
    let item = system
        .coordinator
        .accept_order(order_id, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();

    // Assigned -> Completed skips two states.
    let err = system
        .coordinator
        .update_work_item_status(item.id, WorkItemStatus::Completed, None, &manager)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FulfillmentError::InvalidTransition {
            from: WorkItemStatus::Assigned,
            to: WorkItemStatus::Completed,
        }
    );

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn orders_aggregate_independently() {
    let notifier = Arc::new(RecordingNotifier::new());
    let system = KitchenSystem::new(kitchen_roster(), notifier.clone());
    let manager = Requester::shift_manager("mara");

    let order1 = system.orders.place(order_params("R-1")).await.unwrap();
    let order2 = system.orders.place(order_params("R-2")).await.unwrap();
    let item1 = system
        .coordinator
        .accept_order(order1, Some(StaffId::new("ana")), &manager)
        .await
        .unwrap();
    let item2 = system
        .coordinator
        .accept_order(order2, Some(StaffId::new("bo")), &manager)
        .await
        .unwrap();

    // Ana starts the first order and stays on it while Bo takes the
    // second one all the way through.
    let ana = Requester::line_staff("ana");
    system
        .coordinator
        .update_work_item_status(item1.id, WorkItemStatus::InProgress, None, &ana)
        .await
        .unwrap();

    let bo = Requester::line_staff("bo");
    for status in [
        WorkItemStatus::InProgress,
        WorkItemStatus::Ready,
        WorkItemStatus::Completed,
    ] {
        system
            .coordinator
            .update_work_item_status(item2.id, status, None, &bo)
            .await
            .unwrap();
    }

    // Each order reflects only its own kitchen work.
    let first = system.orders.get(order1).await.unwrap().unwrap();
    assert_eq!(first.status, OrderStatus::Preparing);
    let second = system.orders.get(order2).await.unwrap().unwrap();
    assert_eq!(second.status, OrderStatus::Ready);

    // Only the finished order's customer was notified.
    assert_eq!(notifier.ready_orders(), vec![order2]);

    system.shutdown().await.expect("Shutdown failed");
}
