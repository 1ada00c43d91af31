//! Transfer commit errors.

use stowage_domain::{EntityId, PolicyKind};

use crate::infrastructure::ports::PortError;

/// Errors that can occur while committing a transfer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransferError {
    /// The holder's slot refused the target. The fresh holder was deleted.
    #[error("Holder {holder} refused target {target}")]
    InsertRejected { holder: EntityId, target: EntityId },
    /// Charges ran out between the trigger and the commit.
    #[error("Insufficient charges: {available} available, {requested} requested")]
    InsufficientCharges { available: u32, requested: u32 },
    #[error("Entity not found: {0}")]
    EntityMissing(EntityId),
    /// The entity no longer carries the policy the action was started for.
    #[error("Entity {entity} has no {policy} policy")]
    MissingPolicy { entity: EntityId, policy: PolicyKind },
    #[error("Spawn failed: {0}")]
    Spawn(#[from] PortError),
}

impl TransferError {
    /// Whether the failure means the trigger's preconditions no longer held.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InsufficientCharges { .. } | Self::EntityMissing(_) | Self::MissingPolicy { .. }
        )
    }

    /// Log a failed commit: stale preconditions at debug, anything else at warn.
    pub(crate) fn report(&self, policy: PolicyKind) {
        if self.is_precondition() {
            tracing::debug!(policy = %policy, error = %self, "Transfer no longer applicable");
        } else {
            tracing::warn!(policy = %policy, error = %self, "Transfer failed");
        }
    }
}
