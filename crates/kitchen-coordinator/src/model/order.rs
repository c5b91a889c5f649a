//! The customer order as the kitchen sees it.
//!
//! Orders are created at checkout (out of scope here, modeled by
//! [`OrderCreate`]) and from then on their `status` is owned by the
//! fulfillment flow: task derivation moves a `Placed` order to `Confirmed`,
//! and every later kitchen-driven change goes through the status
//! aggregator. Orders are never deleted, only status-terminated.

use crate::model::{StaffId, WorkItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Externally visible fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// States from which the kitchen may still derive work.
    pub fn accepts_derivation(self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::Confirmed)
    }
}

/// Payment state, owned by the (external) payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    Pending,
    Paid,
    Refunded,
}

/// How the order leaves the restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeliveryDetails {
    Pickup,
    Delivery { address: String, phone: String },
}

/// One ordered line: a menu item snapshot taken at checkout.
///
/// `prep_minutes` is the catalog prep time resolved at checkout; `None`
/// means the catalog had no estimate and task derivation falls back to
/// [`DEFAULT_PREP_MINUTES`](crate::model::work_item::DEFAULT_PREP_MINUTES).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub unit_price_cents: u32,
    pub quantity: u32,
    pub prep_minutes: Option<u32>,
    pub special_instructions: Option<String>,
}

/// A customer purchase request tracked end-to-end through delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number, denormalized onto kitchen work items.
    pub order_number: String,
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    pub total_cents: u32,
    pub delivery: DeliveryDetails,
    pub payment: PaymentState,
    pub status: OrderStatus,
    /// Primary kitchen work item, set by task derivation. Its presence is
    /// the at-most-one-derivation guard.
    pub work_item: Option<WorkItemId>,
    pub assigned_staff: Option<StaffId>,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an order (the checkout handoff).
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    pub delivery: DeliveryDetails,
    pub payment: PaymentState,
    pub placed_at: DateTime<Utc>,
}

/// Partial update applied by the fulfillment flow. Only supplied fields
/// change.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub work_item: Option<WorkItemId>,
    pub assigned_staff: Option<StaffId>,
}

/// Query shape for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let total_cents = params
            .lines
            .iter()
            .map(|line| line.unit_price_cents * line.quantity)
            .sum();
        Self {
            id,
            order_number: params.order_number,
            customer_name: params.customer_name,
            lines: params.lines,
            total_cents,
            delivery: params.delivery,
            payment: params.payment,
            status: OrderStatus::Placed,
            work_item: None,
            assigned_staff: None,
            placed_at: params.placed_at,
            updated_at: params.placed_at,
        }
    }
}
