//! # Kitchen Coordinator
//!
//! > **Kitchen-side fulfillment for a restaurant ordering platform.**
//!
//! Once checkout hands an order over, this crate owns everything until the
//! food is ready: deriving the kitchen work item, assigning staff,
//! tracking preparation status, and keeping the customer-facing order
//! status consistent with what is actually happening at the stations.
//!
//! Built on [`resource_actor`]: each mutable resource lives in its own
//! actor task and processes commands sequentially, so no two writers ever
//! race on the same order or work item.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Rules ([`priority`], [`aggregate`], [`assignment`])
//! Pure functions with no I/O. Priority from order age, order status
//! folded from work-item statuses, workload-balanced staff picking.
//! Everything here is unit-testable with plain values.
//!
//! ### 2. The Resources ([`order_actor`], [`work_item_actor`], [`model`])
//! Concrete [`ActorEntity`](resource_actor::ActorEntity) implementations
//! plus the data types they manage. The work-item entity enforces the
//! status state machine and the staff/manager command split.
//!
//! ### 3. The Interface ([`clients`])
//! Domain-specific wrappers ([`OrderClient`](clients::OrderClient),
//! [`WorkItemClient`](clients::WorkItemClient)) over the raw message
//! passing, translating framework errors back into domain errors.
//!
//! ### 4. The Orchestrators ([`coordinator`], [`aggregator`])
//! [`FulfillmentCoordinator`](coordinator::FulfillmentCoordinator) is the
//! role-gated entry point for every kitchen operation. The
//! [`StatusAggregator`](aggregator::StatusAggregator) is the single
//! consumer of work-item change events and the only writer of
//! kitchen-driven order status.
//!
//! ### 5. The Seams ([`directory`], [`notify`])
//! Trait boundaries to the staff roster and the customer notification
//! channel, with in-process implementations for tests and the demo.
//!
//! ### 6. The Wiring ([`lifecycle`])
//! [`KitchenSystem`](lifecycle::KitchenSystem) spawns the actors and the
//! aggregator and tears them down in order.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -p kitchen-coordinator
//! ```

pub mod aggregate;
pub mod aggregator;
pub mod assignment;
pub mod clients;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod priority;
pub mod work_item_actor;
