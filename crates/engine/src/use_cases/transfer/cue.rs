//! Completion cues played when a transfer commits.

use stowage_domain::{AuthorityContext, Coordinates, EntityId, SoundSpec};

use crate::infrastructure::ports::{AudioPort, AudioTarget};

/// Who plays the sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueMode {
    /// Sent by the authority to everyone in range; never played by a predictor.
    Broadcast,
    /// Played locally by the predicting client too.
    Predicted,
}

/// Where the sound plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueAnchor {
    /// The holder entity.
    Holder,
    /// The transfer target (transfer-in only; falls back to the holder on release).
    Target,
    /// The holder's position captured before anything moved.
    Origin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub sound: SoundSpec,
    pub mode: CueMode,
    pub anchor: CueAnchor,
}

impl Cue {
    pub fn new(sound: SoundSpec, mode: CueMode, anchor: CueAnchor) -> Self {
        Self {
            sound,
            mode,
            anchor,
        }
    }

    /// Build a cue only when the policy declares a sound.
    pub fn optional(sound: Option<&SoundSpec>, mode: CueMode, anchor: CueAnchor) -> Option<Self> {
        sound.map(|sound| Self::new(sound.clone(), mode, anchor))
    }

    /// Whether this cue plays in the given context.
    pub fn plays_in(&self, authority: AuthorityContext) -> bool {
        match self.mode {
            CueMode::Broadcast => authority.is_authoritative(),
            CueMode::Predicted => true,
        }
    }

    pub(crate) fn play(
        &self,
        audio: &dyn AudioPort,
        authority: AuthorityContext,
        at: CueSite,
        user: Option<EntityId>,
    ) {
        if !self.plays_in(authority) {
            return;
        }
        let target = match self.anchor {
            CueAnchor::Holder => AudioTarget::Entity(at.holder),
            CueAnchor::Target => AudioTarget::Entity(at.target.unwrap_or(at.holder)),
            CueAnchor::Origin => AudioTarget::Coordinates(at.origin),
        };
        match self.mode {
            CueMode::Broadcast => audio.play_pvs(&self.sound, target),
            CueMode::Predicted => audio.play_predicted(&self.sound, target, user),
        }
    }
}

/// Entities and position a cue can anchor to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CueSite {
    pub holder: EntityId,
    pub target: Option<EntityId>,
    pub origin: Coordinates,
}
