//! Ambient (non-user) release triggers

use serde::{Deserialize, Serialize};
use std::fmt;

/// World events that can force a holder to release its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmbientTrigger {
    Broken,
    Reclaimed,
    Destroyed,
}

impl AmbientTrigger {
    pub const ALL: [Self; 3] = [Self::Broken, Self::Reclaimed, Self::Destroyed];
}

impl fmt::Display for AmbientTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broken => write!(f, "broken"),
            Self::Reclaimed => write!(f, "reclaimed"),
            Self::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// Per-holder switches for each ambient trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmbientToggles {
    #[serde(default)]
    pub open_on_break: bool,
    #[serde(default)]
    pub open_on_reclaimed: bool,
    #[serde(default)]
    pub open_on_destroyed: bool,
}

impl AmbientToggles {
    /// Releases on reclamation and destruction but not on breakage.
    pub fn destruction_only() -> Self {
        Self {
            open_on_break: false,
            open_on_reclaimed: true,
            open_on_destroyed: true,
        }
    }

    pub fn enables(&self, trigger: AmbientTrigger) -> bool {
        match trigger {
            AmbientTrigger::Broken => self.open_on_break,
            AmbientTrigger::Reclaimed => self.open_on_reclaimed,
            AmbientTrigger::Destroyed => self.open_on_destroyed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_map_one_to_one() {
        let toggles = AmbientToggles {
            open_on_break: true,
            ..AmbientToggles::default()
        };
        assert!(toggles.enables(AmbientTrigger::Broken));
        assert!(!toggles.enables(AmbientTrigger::Reclaimed));
        assert!(!toggles.enables(AmbientTrigger::Destroyed));
    }

    #[test]
    fn destruction_only_skips_breakage() {
        let toggles = AmbientToggles::destruction_only();
        assert!(!toggles.enables(AmbientTrigger::Broken));
        assert!(toggles.enables(AmbientTrigger::Reclaimed));
        assert!(toggles.enables(AmbientTrigger::Destroyed));
    }
}
