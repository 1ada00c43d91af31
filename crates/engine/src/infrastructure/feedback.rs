//! Audio, popup, and projectile collaborators that only record or log.

use std::sync::Mutex;

use stowage_domain::{EntityId, LocKey, SoundSpec};

use crate::infrastructure::ports::{AudioPort, AudioTarget, PopupPort, ProjectilePort};

/// One sound that was asked to play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedSound {
    pub sound: SoundSpec,
    pub target: AudioTarget,
    pub user: Option<EntityId>,
    pub predicted: bool,
}

/// Records every played sound.
#[derive(Default)]
pub struct RecordingAudio {
    played: Mutex<Vec<PlayedSound>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<PlayedSound> {
        self.played
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn record(&self, sound: PlayedSound) {
        tracing::debug!(sound = %sound.sound, predicted = sound.predicted, "Playing sound");
        self.played
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(sound);
    }
}

impl AudioPort for RecordingAudio {
    fn play_pvs(&self, sound: &SoundSpec, target: AudioTarget) {
        self.record(PlayedSound {
            sound: sound.clone(),
            target,
            user: None,
            predicted: false,
        });
    }

    fn play_predicted(&self, sound: &SoundSpec, target: AudioTarget, user: Option<EntityId>) {
        self.record(PlayedSound {
            sound: sound.clone(),
            target,
            user,
            predicted: true,
        });
    }
}

/// Records every popup as `(message, anchor)`.
#[derive(Default)]
pub struct RecordingPopups {
    shown: Mutex<Vec<(LocKey, EntityId)>>,
}

impl RecordingPopups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(LocKey, EntityId)> {
        self.shown
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl PopupPort for RecordingPopups {
    fn popup_predicted(&self, message: &LocKey, anchor: EntityId, _user: Option<EntityId>) {
        tracing::debug!(message = %message, anchor = %anchor, "Popup");
        self.shown
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((message.clone(), anchor));
    }
}

/// Nothing is ever embedded.
pub struct NoopProjectiles;

impl ProjectilePort for NoopProjectiles {
    fn embed_detach(&self, entity: EntityId, _user: Option<EntityId>) {
        tracing::trace!(entity = %entity, "No embedded projectile to detach");
    }
}
