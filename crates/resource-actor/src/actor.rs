//! # Generic Actor Server
//!
//! [`ResourceActor`] is the server half of the framework: it owns the
//! in-memory store for one entity type and processes every request for it
//! sequentially in its own Tokio task.
//!
//! # Architecture Note
//! Sequential processing is the whole concurrency story. However many
//! actors run in parallel, each store has exactly one writer, so there is
//! no lock and no torn state. Two callers racing to mutate the same entity
//! are simply queued; the second sees the first one's result.
//!
//! Mutating requests (`Update`, `Action`) run their hook on a scratch clone
//! and commit only on success, so a failed validation never leaves a
//! half-mutated entity in the store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The store is a `BTreeMap` keyed by `T::Id`, so `List` iterates in
/// ascending ID order (creation order for the counter-generated IDs)
/// which keeps listing and any first-wins selection over the result
/// deterministic.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mpsc channel capacity; client calls wait when
    /// the queue is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes.
    ///
    /// # Context Injection
    /// `context` is passed to every entity hook, giving entities access to
    /// dependencies (usually other actors' clients) wired up after
    /// construction.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "WorkItem" instead of the full path.
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    match self.store.get(&id) {
                        Some(current) => {
                            // Mutate a scratch copy; commit only on success.
                            let mut item = current.clone();
                            if let Err(e) = item.on_update(update, &context).await {
                                warn!(entity_type, %id, error = %e, "Update failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
                ResourceRequest::List {
                    filter,
                    page,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .skip(page.offset)
                        .take(page.limit)
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    match self.store.get(&id) {
                        Some(current) => {
                            let mut item = current.clone();
                            match item.handle_action(action, &context).await {
                                Ok(result) => {
                                    self.store.insert(id.clone(), item);
                                    info!(entity_type, %id, "Action ok");
                                    let _ = respond_to.send(Ok(result));
                                }
                                Err(e) => {
                                    warn!(entity_type, %id, error = %e, "Action failed");
                                    let _ = respond_to
                                        .send(Err(FrameworkError::EntityError(Box::new(e))));
                                }
                            }
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
