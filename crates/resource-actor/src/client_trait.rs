//! # ActorClient Trait
//!
//! Common interface for resource-specific client wrappers. Domain clients
//! (e.g. an `OrderClient`) wrap a [`ResourceClient`] to expose typed
//! methods; implementing this trait gives them `get` and `list` for free
//! while letting them own the framework-to-domain error mapping.

use crate::{ActorEntity, FrameworkError, Page, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// List entities selected by `filter`, windowed by `page`.
    #[tracing::instrument(skip(self, filter))]
    async fn list(&self, filter: T::Filter, page: Page) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .list(filter, page)
            .await
            .map_err(Self::map_error)
    }
}
