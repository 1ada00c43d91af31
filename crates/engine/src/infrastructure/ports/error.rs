//! Error types for port operations.

use stowage_domain::{EntityId, PrototypeId};

/// World operation errors with enough context to act on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    /// Spawn requested for a prototype the catalog does not know.
    #[error("Unknown prototype: {0}")]
    UnknownPrototype(PrototypeId),

    /// Entity does not exist (never spawned, or already deleted).
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),
}

impl PortError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound(_))
    }
}
