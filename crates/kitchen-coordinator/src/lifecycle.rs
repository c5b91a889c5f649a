//! Runtime assembly and graceful shutdown for the fulfillment subsystem.

use crate::aggregator::StatusAggregator;
use crate::clients::{OrderClient, WorkItemClient};
use crate::coordinator::FulfillmentCoordinator;
use crate::directory::StaffDirectory;
use crate::notify::Notifier;
use std::sync::Arc;
use tracing::{error, info};

/// The running fulfillment subsystem: both resource actors, the status
/// aggregator task, and the coordinator facade wired over them.
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(directory, notifier);
///
/// let order_id = system.orders.place(params).await?;
/// system.coordinator.accept_order(order_id, None, &requester).await?;
///
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Role-gated entry point for kitchen operations.
    pub coordinator: FulfillmentCoordinator,

    /// Direct order access, used by the checkout handoff.
    pub orders: OrderClient,

    /// Direct work-item access for read paths that bypass role gating.
    pub work_items: WorkItemClient,

    /// Task handles for the actors and the aggregator, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl KitchenSystem {
    /// Spawns both actors and the status aggregator, and wires the
    /// coordinator over their clients.
    ///
    /// The staff directory and notifier are injected so deployments (and
    /// tests) can bring their own roster source and customer channel.
    pub fn new(directory: Arc<dyn StaffDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        let (order_actor, order_client) = crate::order_actor::new();
        let (work_item_actor, work_item_client) = crate::work_item_actor::new();

        let order_handle = tokio::spawn(order_actor.run(()));
        let work_item_handle = tokio::spawn(work_item_actor.run(()));

        let orders = OrderClient::new(order_client);
        let work_items = WorkItemClient::new(work_item_client);

        let (aggregator, aggregator_client) =
            StatusAggregator::new(orders.clone(), work_items.clone(), notifier);
        let aggregator_handle = tokio::spawn(aggregator.run());

        let coordinator = FulfillmentCoordinator::new(
            orders.clone(),
            work_items.clone(),
            directory,
            aggregator_client,
        );

        info!("Kitchen fulfillment system started");
        Self {
            coordinator,
            orders,
            work_items,
            handles: vec![order_handle, work_item_handle, aggregator_handle],
        }
    }

    /// Gracefully stops the subsystem.
    ///
    /// Dropping the coordinator and the public clients closes every channel
    /// sender; the aggregator drains its queue and exits, then each actor
    /// sees its channel close and leaves its loop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down kitchen fulfillment system...");

        drop(self.coordinator);
        drop(self.orders);
        drop(self.work_items);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed during shutdown: {e:?}");
                return Err(format!("Task failed during shutdown: {e:?}"));
            }
        }

        info!("Kitchen fulfillment system shutdown complete");
        Ok(())
    }
}
