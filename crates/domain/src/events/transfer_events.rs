//! Transfer outcomes, returned from commit operations.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value_objects::{AuthorityContext, ContainerRef, Coordinates};

/// Result of sealing a target inside a new holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealOutcome {
    pub holder: EntityId,
    pub target: EntityId,
    /// Container the target used to sit in, now holding the holder.
    pub enclosing: Option<ContainerRef>,
    /// The enclosing container refused the holder, so it was dropped beside it.
    pub holder_dropped: bool,
}

/// Result of releasing a holder's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseOutcome {
    pub holder: EntityId,
    pub occupant: Option<EntityId>,
    /// Holder position captured before anything moved.
    pub position: Coordinates,
    pub enclosing: Option<ContainerRef>,
    /// The enclosing container refused the occupant, so it was dropped instead.
    pub occupant_dropped: bool,
    pub trash: Option<EntityId>,
    pub authority: AuthorityContext,
}

impl ReleaseOutcome {
    /// Predicted release: reports the current occupant without touching the world.
    pub fn predicted(holder: EntityId, occupant: Option<EntityId>, position: Coordinates) -> Self {
        Self {
            holder,
            occupant,
            position,
            enclosing: None,
            occupant_dropped: false,
            trash: None,
            authority: AuthorityContext::Predicted,
        }
    }
}
