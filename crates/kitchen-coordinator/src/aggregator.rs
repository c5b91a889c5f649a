//! # Status Aggregator
//!
//! The single consumer of [`WorkItemChanged`] events. Every work-item
//! mutation emits exactly one event; this task is the only code that
//! recomputes and writes an order's kitchen-driven status.
//!
//! # Architecture Note
//! Routing all recomputation through one mpsc queue removes the
//! last-recompute-wins race that scattered write-then-recompute call sites
//! would have: recomputations for the same order are serialized, and each
//! one reads the then-current work-item snapshot before writing. The
//! emitter awaits the aggregator's response, so by the time a coordinator
//! operation returns, the order's visible status already reflects the
//! mutation.
//!
//! When recomputation lands an order on `Ready`, the customer is notified
//! here. Notification failure is logged and never propagated.

use crate::aggregate::aggregate_status;
use crate::clients::{OrderClient, WorkItemClient};
use crate::error::FulfillmentError;
use crate::model::{OrderId, OrderStatus, OrderUpdate, WorkItemFilter};
use crate::notify::Notifier;
use resource_actor::{ActorClient, Page};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Event emitted after every work-item mutation for `order_id`.
///
/// `respond_to` carries the recomputed order status back to the emitter
/// (`None` when the order had no non-cancelled kitchen work and kept its
/// pre-kitchen status).
#[derive(Debug)]
pub struct WorkItemChanged {
    pub order_id: OrderId,
    pub respond_to: oneshot::Sender<Result<Option<OrderStatus>, FulfillmentError>>,
}

/// Client half: emits events into the aggregator's queue.
#[derive(Clone)]
pub struct AggregatorClient {
    sender: mpsc::Sender<WorkItemChanged>,
}

impl AggregatorClient {
    /// Emits a change event and awaits the recomputed status.
    pub async fn work_item_changed(
        &self,
        order_id: OrderId,
    ) -> Result<Option<OrderStatus>, FulfillmentError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(WorkItemChanged {
                order_id,
                respond_to,
            })
            .await
            .map_err(|_| FulfillmentError::Actor("aggregator closed".into()))?;
        response
            .await
            .map_err(|_| FulfillmentError::Actor("aggregator dropped response".into()))?
    }
}

/// Server half: owns the queue and performs the recomputation.
pub struct StatusAggregator {
    receiver: mpsc::Receiver<WorkItemChanged>,
    orders: OrderClient,
    work_items: WorkItemClient,
    notifier: Arc<dyn Notifier>,
}

impl StatusAggregator {
    pub fn new(
        orders: OrderClient,
        work_items: WorkItemClient,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, AggregatorClient) {
        let (sender, receiver) = mpsc::channel(32);
        (
            Self {
                receiver,
                orders,
                work_items,
                notifier,
            },
            AggregatorClient { sender },
        )
    }

    /// Consumes events until every emitter is gone.
    pub async fn run(mut self) {
        info!("Status aggregator started");
        while let Some(event) = self.receiver.recv().await {
            let result = self.recompute(event.order_id).await;
            let _ = event.respond_to.send(result);
        }
        info!("Status aggregator shutdown");
    }

    /// One recomputation: fold the order's current work-item snapshot and
    /// write the status back if it moved.
    async fn recompute(
        &self,
        order_id: OrderId,
    ) -> Result<Option<OrderStatus>, FulfillmentError> {
        let items = self
            .work_items
            .list(WorkItemFilter::for_order(order_id), Page::all())
            .await?;
        let statuses: Vec<_> = items.iter().map(|i| i.status).collect();

        let Some(next) = aggregate_status(&statuses) else {
            debug!(%order_id, "No live kitchen work, order status unchanged");
            return Ok(None);
        };

        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::NotFound(order_id.to_string()))?;

        if order.status != next {
            let order = self
                .orders
                .save(
                    order_id,
                    OrderUpdate {
                        status: Some(next),
                        ..OrderUpdate::default()
                    },
                )
                .await?;
            info!(%order_id, status = ?next, "Order status recomputed");

            if next == OrderStatus::Ready {
                if let Err(e) = self.notifier.notify_order_ready(&order).await {
                    // Notification must never block fulfillment progress.
                    warn!(%order_id, error = %e, "Ready notification failed");
                }
            }
        }

        Ok(Some(next))
    }
}
