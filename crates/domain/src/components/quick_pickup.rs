use serde::{Deserialize, Serialize};

use crate::value_objects::{ContainerId, Delay};

fn default_storage_container() -> ContainerId {
    ContainerId::from_static("storagebase")
}

/// Lets a storage entity scoop up items it is used on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickPickupComponent {
    /// Minimum time between two pickups; the engine default applies when unset.
    #[serde(default)]
    pub cooldown: Option<Delay>,
    #[serde(default = "default_storage_container")]
    pub storage_container: ContainerId,
    /// Slots in the storage container; unbounded when unset.
    #[serde(default)]
    pub storage_capacity: Option<u32>,
}

impl QuickPickupComponent {
    /// Use-delay slot reserved for quick pickups.
    pub const DELAY_ID: &'static str = "quickPickup";
}

impl Default for QuickPickupComponent {
    fn default() -> Self {
        Self {
            cooldown: None,
            storage_container: default_storage_container(),
            storage_capacity: None,
        }
    }
}
