//! Frangible containers break open to release a single occupant.

use serde::{Deserialize, Serialize};

use crate::value_objects::{AmbientToggles, ContainerId, Delay, LocKey, PrototypeId, SoundSpec};

fn default_frangible_container() -> ContainerId {
    ContainerId::from_static("frangible_container_contents")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrangibleContainerComponent {
    #[serde(default = "default_frangible_container")]
    pub container_id: ContainerId,
    /// Spawned into the container when the component initializes.
    #[serde(default)]
    pub starting_item: Option<PrototypeId>,
    #[serde(default)]
    pub delay: Delay,
    pub open_verb: LocKey,
    #[serde(default)]
    pub sound: Option<SoundSpec>,
    #[serde(default)]
    pub open_on_interact: bool,
    #[serde(default)]
    pub open_on_use: bool,
    #[serde(flatten)]
    pub release_on: AmbientToggles,
    #[serde(default)]
    pub trash_prototype: Option<PrototypeId>,
}

impl FrangibleContainerComponent {
    pub fn new(open_verb: LocKey) -> Self {
        Self {
            container_id: default_frangible_container(),
            starting_item: None,
            delay: Delay::ZERO,
            open_verb,
            sound: None,
            open_on_interact: false,
            open_on_use: false,
            release_on: AmbientToggles::default(),
            trash_prototype: None,
        }
    }
}
