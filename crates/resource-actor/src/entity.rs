//! # ActorEntity Trait
//!
//! The contract every resource type must implement to be managed by the
//! generic [`ResourceActor`](crate::ResourceActor). Associated types pin the
//! DTOs, actions, filter, context, and error type to the entity, so a
//! request built for one resource cannot be sent to another resource's
//! actor.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by
/// `ResourceActor`.
///
/// # Architecture Note
/// By defining one contract that every resource type satisfies, the actor
/// loop is written once and reused for all of them. Associated types keep
/// the reuse type-safe: an entity's `Create` payload only fits that
/// entity's actor.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can call other actors. The
/// `Context` type carries those dependencies and is injected via
/// [`ResourceActor::run`](crate::ResourceActor::run), not at construction
/// time ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    ///
    /// `Ord` is required because the actor stores entities in a `BTreeMap`,
    /// which gives `List` a stable iteration order. `From<u32>` supports
    /// the actor's counter-based ID generation.
    type Id: Ord + Eq + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The query shape accepted by `List`. Use `()` for unfiltered listing.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity, one enum per actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity is selected by the given filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    /// Override to perform validation or side effects against the context.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received. The entity mutates its
    /// own state; the actor persists whatever the hook leaves behind.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Handle a custom resource-specific action.
    ///
    /// Validation must happen before any mutation: a hook that returns an
    /// error is expected to leave the entity untouched.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
