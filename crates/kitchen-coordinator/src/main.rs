//! Demo binary: walks one order through the whole fulfillment flow.
//!
//! Run with `RUST_LOG=info cargo run -p kitchen-coordinator` to watch the
//! structured logs from the actors, the coordinator, and the aggregator.

use chrono::Utc;
use kitchen_coordinator::directory::InMemoryStaffDirectory;
use kitchen_coordinator::lifecycle::KitchenSystem;
use kitchen_coordinator::model::{
    DeliveryDetails, OrderCreate, OrderLine, PaymentState, Requester, Staff, StaffRole,
    WorkItemStatus,
};
use kitchen_coordinator::notify::LogNotifier;
use resource_actor::tracing::setup_tracing;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting kitchen fulfillment demo");

    let directory = Arc::new(InMemoryStaffDirectory::with_staff(vec![
        Staff::new("mara", "Mara", StaffRole::ShiftManager),
        Staff::new("ana", "Ana", StaffRole::LineStaff),
        Staff::new("bo", "Bo", StaffRole::LineStaff),
    ]));
    let system = KitchenSystem::new(directory, Arc::new(LogNotifier));

    let manager = Requester::shift_manager("mara");

    // Checkout hands the order over.
    let order_params = OrderCreate {
        order_number: "R-1001".to_string(),
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
    };

    let order_id = system
        .orders
        .place(order_params)
        .await
        .map_err(|e| e.to_string())?;
    info!(%order_id, "Order placed");

    // Accept it into the kitchen with workload-balanced auto-assignment.
    let span = tracing::info_span!("order_acceptance");
    let item = async {
        system
            .coordinator
            .accept_order(order_id, None, &manager)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(
        item_id = %item.id,
        assignee = ?item.assigned_to,
        estimated_minutes = item.estimated_prep_minutes(),
        "Work item derived and assigned"
    );

    // The assignee cooks the order.
    let cook = Requester::line_staff(item.assigned_to.clone().ok_or("no assignee")?.0);
    let span = tracing::info_span!("preparation");
    async {
        for status in [
            WorkItemStatus::InProgress,
            WorkItemStatus::Ready,
            WorkItemStatus::Completed,
        ] {
            let item = system
                .coordinator
                .update_work_item_status(item.id, status, None, &cook)
                .await
                .map_err(|e| e.to_string())?;
            info!(status = %item.status, "Work item moved");
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let snapshot = system
        .coordinator
        .workload_snapshot(&manager)
        .await
        .map_err(|e| e.to_string())?;
    for entry in &snapshot {
        info!(staff = %entry.staff_id, active_items = entry.active_items, "Workload");
    }

    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
