//! # Generic Messages
//!
//! Message types exchanged between `ResourceClient` and `ResourceActor`,
//! plus the [`Page`] window used by `List`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Offset/limit window applied after filtering in `List` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The whole result set, unwindowed.
    pub fn all() -> Self {
        Self {
            offset: 0,
            limit: usize::MAX,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::all()
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Instead of ad-hoc messages per operation, every actor answers the same
/// lifecycle set (`Create`, `Get`, `Update`, `List`) plus a custom
/// `Action` variant for resource-specific logic that does not fit the CRUD
/// model. Generic over `T: ActorEntity`, so each variant carries that
/// entity's own payload types and nothing else fits.
///
/// There is no `Delete` variant: entities are status-terminated by their
/// own actions, never removed from the store.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    List {
        filter: T::Filter,
        page: Page,
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
