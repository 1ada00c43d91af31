//! Capability set handed to every engine component at construction.

use std::sync::Arc;

use super::{
    AppearancePort, AudioPort, ChargesPort, ContainerPort, DoAfterPort, EntityPort,
    EventSinkPort, ItemPort, PopupPort, ProjectilePort, UseDelayPort, WhitelistPort,
};

/// Every collaborator the engine talks to.
#[derive(Clone)]
pub struct EnginePorts {
    pub entities: Arc<dyn EntityPort>,
    pub containers: Arc<dyn ContainerPort>,
    pub items: Arc<dyn ItemPort>,
    pub appearance: Arc<dyn AppearancePort>,
    pub whitelist: Arc<dyn WhitelistPort>,
    pub charges: Arc<dyn ChargesPort>,
    pub audio: Arc<dyn AudioPort>,
    pub popups: Arc<dyn PopupPort>,
    pub do_after: Arc<dyn DoAfterPort>,
    pub use_delay: Arc<dyn UseDelayPort>,
    pub projectiles: Arc<dyn ProjectilePort>,
    pub events: Arc<dyn EventSinkPort>,
}
