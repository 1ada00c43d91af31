//! Tools that spawn a receptacle around whatever they are used on.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ContainerId, Delay, EntityWhitelist, LocKey, PrototypeId, SoundSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnAndInsertComponent {
    /// Receptacle prototype spawned at the target.
    pub to_spawn: PrototypeId,
    /// Container on the spawned receptacle that receives the target.
    pub container_id: ContainerId,
    #[serde(default)]
    pub delay: Delay,
    pub interact_verb: LocKey,
    #[serde(default)]
    pub sound: Option<SoundSpec>,
    #[serde(default)]
    pub charges_consumed: Option<u32>,
    #[serde(default)]
    pub whitelist: Option<EntityWhitelist>,
    #[serde(default)]
    pub blacklist: Option<EntityWhitelist>,
}

impl SpawnAndInsertComponent {
    pub fn new(to_spawn: PrototypeId, container_id: ContainerId, interact_verb: LocKey) -> Self {
        Self {
            to_spawn,
            container_id,
            delay: Delay::ZERO,
            interact_verb,
            sound: None,
            charges_consumed: None,
            whitelist: None,
            blacklist: None,
        }
    }
}
