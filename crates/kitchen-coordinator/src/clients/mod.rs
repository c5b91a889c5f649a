//! Type-safe client wrappers around the generic resource clients.
//!
//! The rest of the crate never touches raw message passing: these wrappers
//! expose domain methods, map framework errors back into each actor's own
//! error type (downcasting entity errors instead of flattening them to
//! strings, so callers can still match on the kind), and carry the tracing
//! instrumentation.

pub mod order_client;
pub mod work_item_client;

pub use order_client::OrderClient;
pub use work_item_client::WorkItemClient;
