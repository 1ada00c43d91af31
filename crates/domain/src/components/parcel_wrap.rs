//! Parcel wrap: a tool that wraps items into parcels, and the parcels it makes.

use serde::{Deserialize, Serialize};

use crate::value_objects::{
    AmbientToggles, ContainerId, Delay, EntityWhitelist, ItemSize, LocKey, PrototypeId,
    SoundSpec,
};

/// Appearance keys published on a freshly wrapped parcel.
pub struct WrappedParcelVisuals;

impl WrappedParcelVisuals {
    /// Size class of the wrapped item, so the sprite can scale with it.
    pub const SIZE: &'static str = "wrapped_parcel_size";
}

fn default_parcel_prototype() -> PrototypeId {
    PrototypeId::from_static("WrappedParcel")
}

fn default_maintain_size() -> bool {
    true
}

fn default_fallback_size() -> ItemSize {
    ItemSize::Ginormous
}

/// A roll of parcel wrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelWrapComponent {
    /// What gets spawned around the wrapped item.
    #[serde(default = "default_parcel_prototype")]
    pub parcel_prototype: PrototypeId,
    /// Parcels take the wrapped item's size class.
    #[serde(default = "default_maintain_size")]
    pub wrapped_items_maintain_size: bool,
    /// Parcels copy the wrapped item's shape override, if it has one.
    #[serde(default)]
    pub wrapped_items_maintain_shape: bool,
    /// Size used when the wrapped item's size is not kept.
    #[serde(default = "default_fallback_size")]
    pub fallback_item_size: ItemSize,
    #[serde(default)]
    pub wrap_sound: Option<SoundSpec>,
    #[serde(default)]
    pub whitelist: Option<EntityWhitelist>,
    #[serde(default)]
    pub blacklist: Option<EntityWhitelist>,
    #[serde(default)]
    pub wrap_delay: Delay,
    #[serde(default)]
    pub charges_consumed: Option<u32>,
}

impl ParcelWrapComponent {
    pub fn wrap_verb() -> LocKey {
        LocKey::from_static("parcel-wrap-verb-wrap")
    }
}

impl Default for ParcelWrapComponent {
    fn default() -> Self {
        Self {
            parcel_prototype: default_parcel_prototype(),
            wrapped_items_maintain_size: default_maintain_size(),
            wrapped_items_maintain_shape: false,
            fallback_item_size: default_fallback_size(),
            wrap_sound: None,
            whitelist: None,
            blacklist: None,
            wrap_delay: Delay::ZERO,
            charges_consumed: None,
        }
    }
}

fn default_parcel_container() -> ContainerId {
    ContainerId::from_static("contents")
}

fn default_unwrap_trash() -> Option<PrototypeId> {
    Some(PrototypeId::from_static("ParcelWrapTrash"))
}

/// A parcel holding exactly one wrapped item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedParcelComponent {
    #[serde(default = "default_parcel_container")]
    pub container_id: ContainerId,
    #[serde(default)]
    pub unwrap_sound: Option<SoundSpec>,
    /// Spawned next to the parcel when it is opened.
    #[serde(default = "default_unwrap_trash")]
    pub unwrap_trash: Option<PrototypeId>,
}

impl WrappedParcelComponent {
    pub fn unwrap_verb() -> LocKey {
        LocKey::from_static("parcel-wrap-verb-unwrap")
    }

    /// A parcel always gives up its contents when reclaimed or destroyed.
    pub fn release_triggers() -> AmbientToggles {
        AmbientToggles::destruction_only()
    }

    /// Popup shown at the contents when a parcel is destroyed around them.
    pub fn destroyed_popup() -> LocKey {
        LocKey::from_static("parcel-wrap-popup-parcel-destroyed")
    }
}

impl Default for WrappedParcelComponent {
    fn default() -> Self {
        Self {
            container_id: default_parcel_container(),
            unwrap_sound: None,
            unwrap_trash: default_unwrap_trash(),
        }
    }
}
