//! Engine event fan-out over a tokio broadcast channel.

use stowage_domain::EngineEvent;
use tokio::sync::broadcast;

use crate::infrastructure::ports::EventSinkPort;

const DEFAULT_CAPACITY: usize = 256;

/// Publishes engine events to any number of subscribers.
///
/// Publishing never blocks; events sent while nobody listens are dropped, and
/// slow subscribers observe a lag error rather than stalling the engine.
pub struct BroadcastEventSink {
    sender: broadcast::Sender<EngineEvent>,
}

impl BroadcastEventSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSinkPort for BroadcastEventSink {
    fn publish(&self, event: EngineEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Engine event dropped, no subscribers");
        }
    }
}
