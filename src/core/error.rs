//! Kernel error taxonomy.
//!
//! - [`ContainerError`]: expected outcomes of container queries (`Empty`,
//!   `NotFound`). Returned as values; callers check them.
//! - [`KernelError`]: failures of a kernel operation. Every variant is
//!   returned synchronously from the call that caused it, and the state the
//!   call was given is left exactly as it was.

use thiserror::Error;

use super::entity::EntityId;

/// Expected, recoverable outcomes of container queries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("{0} is empty")]
    Empty(EntityId),
    #[error("{item} is not in {container}")]
    NotFound { item: EntityId, container: EntityId },
}

/// Errors surfaced by kernel and forward-model operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KernelError {
    /// An id that is not present in this state tree. Indicates a stale
    /// action from a superseded state: a programming error.
    #[error("dangling reference: {0} is not present in this state")]
    DanglingReference(EntityId),
    #[error("{id} is not a {expected}")]
    WrongEntityKind { id: EntityId, expected: &'static str },
    /// The action does not fit the current lifecycle, phase or resolver state.
    #[error("illegal phase transition: {0}")]
    IllegalPhaseTransition(String),
    #[error("game is already over")]
    GameOver,
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for KernelError {
    fn from(err: bincode::Error) -> Self {
        KernelError::Serialization(err.to_string())
    }
}
