//! Plain data passed across port boundaries.

use stowage_domain::{Coordinates, EntityId};

/// Where a sound is played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioTarget {
    /// Follows the entity while it exists.
    Entity(EntityId),
    /// Fixed world position, for entities about to be deleted.
    Coordinates(Coordinates),
}
