//! Pure data structures of the fulfillment domain, implementing the
//! [`ActorEntity`](resource_actor::ActorEntity) trait where an actor owns
//! them.

pub mod order;
pub mod staff;
pub mod work_item;

pub use order::*;
pub use staff::*;
pub use work_item::*;
