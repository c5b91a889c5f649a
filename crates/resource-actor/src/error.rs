//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity-specific failures
//! travel inside [`FrameworkError::EntityError`] and can be downcast back
//! to the entity's own error type by domain clients.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
