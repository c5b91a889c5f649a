//! # Resource Actor
//!
//! Generic building blocks for type-safe, concurrent resource actors on top
//! of Tokio. Each resource type (an [`ActorEntity`]) gets its own actor task
//! that owns the entity store and processes requests sequentially, so no
//! locks are needed for internal state while many actors run in parallel.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): your domain model and its business
//!    rules, expressed through lifecycle hooks and a custom action handler.
//! 2. **Runtime** ([`ResourceActor`]): the message loop that owns the store.
//! 3. **Interface** ([`ResourceClient`]): a cheap-to-clone, type-safe
//!    client that forwards requests over an mpsc channel and awaits oneshot
//!    responses.
//!
//! ## Operations
//!
//! The request surface is resource-oriented: `Create`, `Get`, `Update`,
//! `List`, and a custom `Action` escape hatch for domain operations that do
//! not fit the CRUD shape. `List` filters the store through an
//! entity-defined [`ActorEntity::Filter`] and pages the result with
//! [`Page`]; the store is a `BTreeMap`, so listing order is stable
//! (ascending ID, which is creation order for counter-generated IDs).
//!
//! There is deliberately no `Delete`: resources managed by this crate are
//! status-terminated, never physically removed.
//!
//! ## Context injection
//!
//! Dependencies are injected at runtime via [`ResourceActor::run`], not at
//! construction time. This "late binding" lets actors reference each other's
//! clients without circular construction order.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, Page, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Ticket {
//!     id: u32,
//!     topic: String,
//!     open: bool,
//! }
//!
//! #[derive(Debug)]
//! struct TicketCreate {
//!     topic: String,
//! }
//!
//! #[derive(Debug)]
//! struct TicketUpdate {
//!     open: Option<bool>,
//! }
//!
//! #[derive(Debug)]
//! struct OpenOnly(bool);
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("ticket error: {0}")]
//! struct TicketError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32;
//!     type Create = TicketCreate;
//!     type Update = TicketUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Filter = OpenOnly;
//!     type Context = ();
//!     type Error = TicketError;
//!
//!     fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, topic: params.topic, open: true })
//!     }
//!
//!     fn matches(&self, filter: &OpenOnly) -> bool {
//!         !filter.0 || self.open
//!     }
//!
//!     async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(open) = update.open {
//!             self.open = open;
//!         }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ticket>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TicketCreate { topic: "late delivery".into() }).await.unwrap();
//!     let ticket = client.get(id).await.unwrap().unwrap();
//!     assert!(ticket.open);
//!
//!     let open = client.list(OpenOnly(true), Page::all()).await.unwrap();
//!     assert_eq!(open.len(), 1);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) that
//! implements the same `ResourceClient<T>` surface entirely in-memory, with
//! expectation tracking, plus a lower-level channel harness
//! ([`mock::create_mock_client`]) for asserting on raw requests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Page, ResourceRequest, Response};
