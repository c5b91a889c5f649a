//! # Order Actor
//!
//! The resource actor backing the order store (`find_order` / `save_order`
//! in collaborator terms). Checkout hands orders in via `create`; the
//! fulfillment flow mutates them via `update`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new order actor and its client.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}
