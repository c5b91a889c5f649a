//! # Fulfillment Coordinator
//!
//! The role-gated facade over the whole subsystem: order acceptance (task
//! derivation + assignment), work-item listing, status updates,
//! reassignment, cancellation, and the workload snapshot.
//!
//! # Architecture Note
//! Every mutation here is two explicit steps of one use case: the
//! work-item command, then exactly one [`WorkItemChanged`] event into the
//! aggregator, never an implicit hook on persistence. The coordinator
//! awaits the aggregator's answer, so the order's visible status is
//! consistent with the mutation by the time an operation returns.

use crate::aggregator::AggregatorClient;
use crate::assignment::{pick_least_loaded, workload_by_staff, workload_snapshot};
use crate::clients::{OrderClient, WorkItemClient};
use crate::directory::StaffDirectory;
use crate::error::FulfillmentError;
use crate::model::{
    Order, OrderId, OrderStatus, OrderUpdate, Requester, Staff, StaffId, StaffRole,
    StaffWorkload, SubItem, SubItemStatus, WorkItem, WorkItemCreate, WorkItemFilter, WorkItemId,
    WorkItemStatus, DEFAULT_PREP_MINUTES,
};
use crate::priority::compute_priority;
use crate::work_item_actor::{ManagerCommand, StaffCommand, WorkItemCommand};
use chrono::Utc;
use resource_actor::{ActorClient, Page};
use std::sync::Arc;
use tracing::{info, instrument};

/// Both kitchen roles, the eligible set for auto-assignment.
const KITCHEN_ROLES: [StaffRole; 2] = [StaffRole::LineStaff, StaffRole::ShiftManager];

/// Orchestrates task derivation, assignment, status transitions, and
/// status aggregation for kitchen fulfillment.
#[derive(Clone)]
pub struct FulfillmentCoordinator {
    orders: OrderClient,
    work_items: WorkItemClient,
    directory: Arc<dyn StaffDirectory>,
    aggregator: AggregatorClient,
}

impl FulfillmentCoordinator {
    pub fn new(
        orders: OrderClient,
        work_items: WorkItemClient,
        directory: Arc<dyn StaffDirectory>,
        aggregator: AggregatorClient,
    ) -> Self {
        Self {
            orders,
            work_items,
            directory,
            aggregator,
        }
    }

    /// Accepts an order into the kitchen: derives its work item, assigns
    /// staff (explicitly or by workload balancing), confirms the order,
    /// and returns the work item.
    ///
    /// Derivation is meaningful at most once per order: an order that
    /// already carries a primary work item is a conflict, as is one
    /// outside `Placed`/`Confirmed`. Explicit assignment requires the
    /// requester to be a shift manager or the self-assigning staff member.
    #[instrument(skip(self, requester), fields(requester = %requester.id))]
    pub async fn accept_order(
        &self,
        order_id: OrderId,
        assign_to: Option<StaffId>,
        requester: &Requester,
    ) -> Result<WorkItem, FulfillmentError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::NotFound(order_id.to_string()))?;

        if let Some(existing) = order.work_item {
            return Err(FulfillmentError::Conflict(format!(
                "{order_id} already has kitchen work ({existing})"
            )));
        }
        if !order.status.accepts_derivation() {
            return Err(FulfillmentError::Conflict(format!(
                "{order_id} cannot be accepted from status {:?}",
                order.status
            )));
        }

        // Decide who gets the item before persisting anything, so a
        // staffing failure leaves no partial state behind.
        let plan = match &assign_to {
            Some(staff_id) => {
                if !requester.is_manager() && requester.id != *staff_id {
                    return Err(FulfillmentError::PermissionDenied(format!(
                        "{} may not assign work to {staff_id}",
                        requester.id
                    )));
                }
                AssignmentPlan::Explicit(staff_id.clone())
            }
            None => {
                let staff_id = self.pick_auto_assignee().await?;
                AssignmentPlan::Auto(staff_id)
            }
        };

        let item_id = self.work_items.derive(derive_task(&order)).await?;
        self.orders
            .save(
                order_id,
                OrderUpdate {
                    status: Some(OrderStatus::Confirmed),
                    work_item: Some(item_id),
                    ..OrderUpdate::default()
                },
            )
            .await?;

        let command = match &plan {
            // Self-acceptance by line staff goes through the staff-side
            // command so its own guards apply; everything else is bound
            // with manager/system authority.
            AssignmentPlan::Explicit(staff_id) if !requester.is_manager() => {
                WorkItemCommand::Staff(StaffCommand::Accept {
                    requester: staff_id.clone(),
                })
            }
            AssignmentPlan::Explicit(staff_id) | AssignmentPlan::Auto(staff_id) => {
                WorkItemCommand::Manager(ManagerCommand::Assign {
                    staff_id: staff_id.clone(),
                })
            }
        };
        let item = self.work_items.command(item_id, command).await?;
        self.orders
            .save(
                order_id,
                OrderUpdate {
                    assigned_staff: item.assigned_to.clone(),
                    ..OrderUpdate::default()
                },
            )
            .await?;

        self.aggregator.work_item_changed(order_id).await?;
        info!(%order_id, %item_id, assignee = ?item.assigned_to, "Order accepted into kitchen");
        Ok(item)
    }

    /// Lists work items. Line staff are implicitly restricted to their own
    /// items; shift managers see everything the filter allows.
    #[instrument(skip(self, filter, requester), fields(requester = %requester.id))]
    pub async fn list_work_items(
        &self,
        mut filter: WorkItemFilter,
        page: Page,
        requester: &Requester,
    ) -> Result<Vec<WorkItem>, FulfillmentError> {
        if !requester.is_manager() {
            filter.assigned_to = Some(requester.id.clone());
        }
        Ok(self.work_items.list(filter, page).await?)
    }

    /// Applies a status transition and recomputes the owning order's
    /// status. Line staff may only move their own items; managers may move
    /// any.
    #[instrument(skip(self, notes, requester), fields(requester = %requester.id))]
    pub async fn update_work_item_status(
        &self,
        item_id: WorkItemId,
        new_status: WorkItemStatus,
        notes: Option<String>,
        requester: &Requester,
    ) -> Result<WorkItem, FulfillmentError> {
        let command = if requester.is_manager() {
            WorkItemCommand::Manager(ManagerCommand::Transition { new_status, notes })
        } else {
            WorkItemCommand::Staff(StaffCommand::Transition {
                requester: requester.id.clone(),
                new_status,
                notes,
            })
        };
        let item = self.work_items.command(item_id, command).await?;
        self.aggregator.work_item_changed(item.order_id).await?;
        Ok(item)
    }

    /// Moves a work item to another staff member without resetting its
    /// progress. Shift managers only.
    #[instrument(skip(self, requester), fields(requester = %requester.id))]
    pub async fn reassign_work_item(
        &self,
        item_id: WorkItemId,
        staff_id: StaffId,
        requester: &Requester,
    ) -> Result<WorkItem, FulfillmentError> {
        self.require_manager(requester, "reassign work items")?;
        let item = self
            .work_items
            .command(
                item_id,
                WorkItemCommand::Manager(ManagerCommand::Assign { staff_id }),
            )
            .await?;
        self.orders
            .save(
                item.order_id,
                OrderUpdate {
                    assigned_staff: item.assigned_to.clone(),
                    ..OrderUpdate::default()
                },
            )
            .await?;
        self.aggregator.work_item_changed(item.order_id).await?;
        Ok(item)
    }

    /// Terminally cancels a work item. Shift managers only.
    #[instrument(skip(self, requester), fields(requester = %requester.id))]
    pub async fn cancel_work_item(
        &self,
        item_id: WorkItemId,
        requester: &Requester,
    ) -> Result<(), FulfillmentError> {
        self.require_manager(requester, "cancel work items")?;
        let item = self
            .work_items
            .command(item_id, WorkItemCommand::Manager(ManagerCommand::Cancel))
            .await?;
        self.aggregator.work_item_changed(item.order_id).await?;
        Ok(())
    }

    /// Current active-item counts per staff member, in directory order.
    /// Shift managers only; auto-assignment uses the same computation
    /// internally.
    #[instrument(skip(self, requester), fields(requester = %requester.id))]
    pub async fn workload_snapshot(
        &self,
        requester: &Requester,
    ) -> Result<Vec<StaffWorkload>, FulfillmentError> {
        self.require_manager(requester, "view the workload snapshot")?;
        let (roster, active_items) = self.roster_and_active_items().await?;
        Ok(workload_snapshot(&roster, &active_items))
    }

    // --- internals ---

    fn require_manager(
        &self,
        requester: &Requester,
        action: &str,
    ) -> Result<(), FulfillmentError> {
        if requester.is_manager() {
            Ok(())
        } else {
            Err(FulfillmentError::PermissionDenied(format!(
                "only shift managers may {action}"
            )))
        }
    }

    async fn roster_and_active_items(
        &self,
    ) -> Result<(Vec<Staff>, Vec<WorkItem>), FulfillmentError> {
        let roster = self.directory.list_active_staff(&KITCHEN_ROLES).await;
        let active_items = self
            .work_items
            .list(WorkItemFilter::active(), Page::all())
            .await?;
        Ok((roster, active_items))
    }

    /// The least-loaded active staff member, or `NoAvailableStaff`.
    async fn pick_auto_assignee(&self) -> Result<StaffId, FulfillmentError> {
        let (roster, active_items) = self.roster_and_active_items().await?;
        let workloads = workload_by_staff(&active_items);
        pick_least_loaded(&roster, &workloads)
            .map(|staff| staff.id.clone())
            .ok_or(FulfillmentError::NoAvailableStaff)
    }
}

enum AssignmentPlan {
    Explicit(StaffId),
    Auto(StaffId),
}

/// Task derivation: one work item carrying all of the order's lines as
/// sub-items, with catalog prep times defaulted where unknown and priority
/// computed from the order's age.
fn derive_task(order: &Order) -> WorkItemCreate {
    let sub_items = order
        .lines
        .iter()
        .map(|line| SubItem {
            menu_item_id: line.menu_item_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            prep_minutes: line.prep_minutes.unwrap_or(DEFAULT_PREP_MINUTES),
            status: SubItemStatus::Pending,
            special_instructions: line.special_instructions.clone(),
        })
        .collect();

    WorkItemCreate {
        order_id: order.id,
        order_number: order.order_number.clone(),
        customer_name: order.customer_name.clone(),
        sub_items,
        priority: compute_priority(order.placed_at, Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryStaffDirectory;
    use crate::model::{DeliveryDetails, OrderCreate, OrderLine, PaymentState};
    use crate::notify::LogNotifier;
    use resource_actor::mock::MockClient;

    fn placed_order(id: u32) -> Order {
        Order::new(
            OrderId(id),
            OrderCreate {
                order_number: format!("R-{id}"),
                customer_name: "Dana".into(),
                lines: vec![OrderLine {
                    menu_item_id: "burger".into(),
                    name: "Burger".into(),
                    unit_price_cents: 950,
                    quantity: 1,
                    prep_minutes: Some(10),
                    special_instructions: None,
                }],
                delivery: DeliveryDetails::Pickup,
                payment: PaymentState::Paid,
                placed_at: Utc::now(),
            },
        )
    }

    fn coordinator_with_mocks(
        order_mock: &MockClient<Order>,
        item_mock: &MockClient<WorkItem>,
        directory: Arc<InMemoryStaffDirectory>,
    ) -> FulfillmentCoordinator {
        let orders = OrderClient::new(order_mock.client());
        let work_items = WorkItemClient::new(item_mock.client());
        let (aggregator, aggregator_client) = crate::aggregator::StatusAggregator::new(
            orders.clone(),
            work_items.clone(),
            Arc::new(LogNotifier),
        );
        tokio::spawn(aggregator.run());
        FulfillmentCoordinator::new(orders, work_items, directory, aggregator_client)
    }

    #[tokio::test]
    async fn empty_roster_fails_before_any_write() {
        let mut order_mock = MockClient::<Order>::new();
        let item_mock = MockClient::<WorkItem>::new();
        order_mock
            .expect_get(OrderId(1))
            .return_ok(Some(placed_order(1)));

        let coordinator = coordinator_with_mocks(
            &order_mock,
            &item_mock,
            Arc::new(InMemoryStaffDirectory::new()),
        );

        let mut item_mock = item_mock;
        // Auto-assign needs the active-item snapshot before concluding
        // nobody is available.
        item_mock.expect_list().return_ok(vec![]);

        let requester = Requester::shift_manager("mara");
        let err = coordinator
            .accept_order(OrderId(1), None, &requester)
            .await
            .unwrap_err();
        assert_eq!(err, FulfillmentError::NoAvailableStaff);

        // No derive, no order save: the expectation queues are empty.
        order_mock.verify();
        item_mock.verify();
    }

    #[tokio::test]
    async fn rederivation_is_a_conflict() {
        let mut order_mock = MockClient::<Order>::new();
        let item_mock = MockClient::<WorkItem>::new();

        let mut order = placed_order(3);
        order.work_item = Some(WorkItemId(9));
        order_mock.expect_get(OrderId(3)).return_ok(Some(order));

        let coordinator = coordinator_with_mocks(
            &order_mock,
            &item_mock,
            Arc::new(InMemoryStaffDirectory::new()),
        );

        let requester = Requester::shift_manager("mara");
        let err = coordinator
            .accept_order(OrderId(3), None, &requester)
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Conflict(_)));
        order_mock.verify();
        item_mock.verify();
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut order_mock = MockClient::<Order>::new();
        let item_mock = MockClient::<WorkItem>::new();
        order_mock.expect_get(OrderId(42)).return_ok(None);

        let coordinator = coordinator_with_mocks(
            &order_mock,
            &item_mock,
            Arc::new(InMemoryStaffDirectory::new()),
        );

        let requester = Requester::line_staff("ana");
        let err = coordinator
            .accept_order(OrderId(42), None, &requester)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
        order_mock.verify();
    }

    #[tokio::test]
    async fn line_staff_cannot_assign_to_someone_else() {
        let mut order_mock = MockClient::<Order>::new();
        let item_mock = MockClient::<WorkItem>::new();
        order_mock
            .expect_get(OrderId(5))
            .return_ok(Some(placed_order(5)));

        let coordinator = coordinator_with_mocks(
            &order_mock,
            &item_mock,
            Arc::new(InMemoryStaffDirectory::new()),
        );

        let requester = Requester::line_staff("ana");
        let err = coordinator
            .accept_order(OrderId(5), Some(StaffId::new("bo")), &requester)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "permission_denied");
        order_mock.verify();
        item_mock.verify();
    }
}
