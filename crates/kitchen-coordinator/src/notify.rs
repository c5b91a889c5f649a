//! # Notification Service (external collaborator)
//!
//! Fire-and-forget customer notifications. A failed notification must
//! never fail or roll back a status transition, so the aggregator catches
//! and logs errors from this trait instead of propagating them. This is
//! the one deliberately swallowed error category in the system.

use crate::model::Order;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Error from the notification transport (mail gateway down, etc.).
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound customer notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the customer their order is ready for pickup/delivery.
    async fn notify_order_ready(&self, order: &Order) -> Result<(), NotifyError>;
}

/// Default notifier: logs instead of sending, for the demo binary and
/// local runs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_order_ready(&self, order: &Order) -> Result<(), NotifyError> {
        info!(order_id = %order.id, customer = %order.customer_name, "Order ready, notifying customer");
        Ok(())
    }
}
