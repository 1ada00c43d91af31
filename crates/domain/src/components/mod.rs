//! Policy components attached to entities.
//!
//! Each component is the per-variant transfer policy: which trigger opens or
//! fills a holder, how long it takes, what it costs, and what it leaves behind.

mod frangible;
mod parcel_wrap;
mod quick_pickup;
mod spawn_insert;

pub use frangible::FrangibleContainerComponent;
pub use parcel_wrap::{ParcelWrapComponent, WrappedParcelComponent, WrappedParcelVisuals};
pub use quick_pickup::QuickPickupComponent;
pub use spawn_insert::SpawnAndInsertComponent;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of policy kinds the engine knows how to route triggers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    ParcelWrap,
    WrappedParcel,
    FrangibleContainer,
    SpawnAndInsert,
    QuickPickup,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParcelWrap => write!(f, "parcel_wrap"),
            Self::WrappedParcel => write!(f, "wrapped_parcel"),
            Self::FrangibleContainer => write!(f, "frangible_container"),
            Self::SpawnAndInsert => write!(f, "spawn_and_insert"),
            Self::QuickPickup => write!(f, "quick_pickup"),
        }
    }
}

/// Every policy component one entity carries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentSet {
    #[serde(default)]
    pub parcel_wrap: Option<ParcelWrapComponent>,
    #[serde(default)]
    pub wrapped_parcel: Option<WrappedParcelComponent>,
    #[serde(default)]
    pub frangible: Option<FrangibleContainerComponent>,
    #[serde(default)]
    pub spawn_and_insert: Option<SpawnAndInsertComponent>,
    #[serde(default)]
    pub quick_pickup: Option<QuickPickupComponent>,
}

impl ComponentSet {
    pub fn has(&self, kind: PolicyKind) -> bool {
        match kind {
            PolicyKind::ParcelWrap => self.parcel_wrap.is_some(),
            PolicyKind::WrappedParcel => self.wrapped_parcel.is_some(),
            PolicyKind::FrangibleContainer => self.frangible.is_some(),
            PolicyKind::SpawnAndInsert => self.spawn_and_insert.is_some(),
            PolicyKind::QuickPickup => self.quick_pickup.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    pub fn kinds(&self) -> Vec<PolicyKind> {
        [
            PolicyKind::ParcelWrap,
            PolicyKind::WrappedParcel,
            PolicyKind::FrangibleContainer,
            PolicyKind::SpawnAndInsert,
            PolicyKind::QuickPickup,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }

    /// Overlay `other` onto this set; components present in `other` win.
    pub fn merge(&mut self, other: ComponentSet) {
        if other.parcel_wrap.is_some() {
            self.parcel_wrap = other.parcel_wrap;
        }
        if other.wrapped_parcel.is_some() {
            self.wrapped_parcel = other.wrapped_parcel;
        }
        if other.frangible.is_some() {
            self.frangible = other.frangible;
        }
        if other.spawn_and_insert.is_some() {
            self.spawn_and_insert = other.spawn_and_insert;
        }
        if other.quick_pickup.is_some() {
            self.quick_pickup = other.quick_pickup;
        }
    }
}
