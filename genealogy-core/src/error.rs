//! Error types for genealogy operations.

use std::fmt::Debug;

use thiserror::Error;

/// Errors returned by [`Genealogy`](crate::Genealogy) operations.
///
/// Every failing mutation leaves the graph exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenealogyError<Id: Debug> {
    /// The identifier does not name a node in the graph.
    #[error("virus not found: {0:?}")]
    NotFound(Id),

    /// The identifier is already taken by an existing node.
    #[error("virus already created: {0:?}")]
    AlreadyExists(Id),

    /// The stem is the root of the graph and can never be removed.
    #[error("tried to remove stem virus: {0:?}")]
    CannotRemoveStem(Id),
}

/// Result alias for genealogy operations keyed by `Id`.
pub type Result<T, Id> = std::result::Result<T, GenealogyError<Id>>;
