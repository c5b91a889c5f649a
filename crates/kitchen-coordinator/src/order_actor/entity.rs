//! Entity trait implementation for the order.
//!
//! The order actor is a plain store: the interesting mutations (status
//! recomputation, work-item linkage) arrive as [`OrderUpdate`]s from the
//! coordinator and the aggregator, which own the invariants. The actor
//! only applies them and stamps `updated_at`.

use crate::model::{Order, OrderCreate, OrderFilter, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = crate::model::OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = OrderFilter;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: Self::Id, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::Validation(
                "an order needs at least one line item".into(),
            ));
        }
        Ok(Order::new(id, params))
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.status.map_or(true, |status| self.status == status)
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(work_item) = update.work_item {
            self.work_item = Some(work_item);
        }
        if let Some(staff) = update.assigned_staff {
            self.assigned_staff = Some(staff);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
