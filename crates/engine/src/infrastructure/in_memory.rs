//! The full set of in-memory adapters, wired to one clock.

use std::sync::Arc;

use stowage_domain::PrototypeCatalog;

use crate::infrastructure::{
    charges::InMemoryCharges,
    clock::FixedClock,
    do_after::InMemoryDoAfterScheduler,
    events::BroadcastEventSink,
    feedback::{NoopProjectiles, RecordingAudio, RecordingPopups},
    ports::EnginePorts,
    use_delay::InMemoryUseDelay,
    world::InMemoryWorld,
};

/// Concrete handles to every in-memory adapter, kept so hosts and tests can
/// drive the clock and scheduler and inspect what happened.
#[derive(Clone)]
pub struct InMemoryAdapters {
    pub world: Arc<InMemoryWorld>,
    pub charges: Arc<InMemoryCharges>,
    pub clock: Arc<FixedClock>,
    pub scheduler: Arc<InMemoryDoAfterScheduler>,
    pub use_delay: Arc<InMemoryUseDelay>,
    pub audio: Arc<RecordingAudio>,
    pub popups: Arc<RecordingPopups>,
    pub events: Arc<BroadcastEventSink>,
}

impl InMemoryAdapters {
    pub fn new(catalog: Arc<PrototypeCatalog>, clock: Arc<FixedClock>) -> Self {
        Self {
            world: Arc::new(InMemoryWorld::new(catalog)),
            charges: Arc::new(InMemoryCharges::new()),
            scheduler: Arc::new(InMemoryDoAfterScheduler::new(clock.clone())),
            use_delay: Arc::new(InMemoryUseDelay::new(clock.clone())),
            clock,
            audio: Arc::new(RecordingAudio::new()),
            popups: Arc::new(RecordingPopups::new()),
            events: Arc::new(BroadcastEventSink::new()),
        }
    }

    /// Port bundle backed by these adapters.
    pub fn ports(&self) -> EnginePorts {
        EnginePorts {
            entities: self.world.clone(),
            containers: self.world.clone(),
            items: self.world.clone(),
            appearance: self.world.clone(),
            whitelist: self.world.clone(),
            charges: self.charges.clone(),
            audio: self.audio.clone(),
            popups: self.popups.clone(),
            do_after: self.scheduler.clone(),
            use_delay: self.use_delay.clone(),
            projectiles: Arc::new(NoopProjectiles),
            events: self.events.clone(),
        }
    }
}
