//! # Order Client
//!
//! High-level API for the order actor. `get` and `list` come from the
//! [`ActorClient`] trait.

use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Persists a freshly placed order (the checkout handoff).
    #[instrument(skip(self, params))]
    pub async fn place(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Applies a partial update and returns the stored order.
    #[instrument(skip(self, update))]
    pub async fn save(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!(?update, "save called");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::EntityError(boxed) => match boxed.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::ActorCommunication(other.to_string()),
            },
            other => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
