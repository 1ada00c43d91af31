//! Side-effect service ports: charges, cues, timed actions, cooldowns, events.

use stowage_domain::{
    ChargeSpend, Delay, DoAfterId, DoAfterRequest, EngineEvent, EntityId, LimitedCharges, LocKey,
    SoundSpec,
};

use super::AudioTarget;

#[cfg_attr(test, mockall::automock)]
pub trait ChargesPort: Send + Sync {
    fn set_charges(&self, entity: EntityId, charges: LimitedCharges);
    fn charges(&self, entity: EntityId) -> Option<LimitedCharges>;
    /// False for entities without a charge counter.
    fn has_insufficient_charges(&self, entity: EntityId, amount: u32) -> bool;
    /// Check and decrement as one step.
    fn try_use_charges(&self, entity: EntityId, amount: u32) -> ChargeSpend;
    fn restore_charges(&self, entity: EntityId, amount: u32);
    fn forget(&self, entity: EntityId);
}

#[cfg_attr(test, mockall::automock)]
pub trait AudioPort: Send + Sync {
    /// Authoritative broadcast to everyone in range.
    fn play_pvs(&self, sound: &SoundSpec, target: AudioTarget);
    /// Played locally by the predicting client and by the authority for everyone else.
    fn play_predicted(&self, sound: &SoundSpec, target: AudioTarget, user: Option<EntityId>);
}

#[cfg_attr(test, mockall::automock)]
pub trait PopupPort: Send + Sync {
    fn popup_predicted(&self, message: &LocKey, anchor: EntityId, user: Option<EntityId>);
}

#[cfg_attr(test, mockall::automock)]
pub trait DoAfterPort: Send + Sync {
    /// Schedule a timed action. `None` when the scheduler refuses it.
    fn start(&self, request: DoAfterRequest) -> Option<DoAfterId>;
}

#[cfg_attr(test, mockall::automock)]
pub trait UseDelayPort: Send + Sync {
    fn set_length(&self, entity: EntityId, id: &str, length: Delay);
    fn is_delayed(&self, entity: EntityId, id: &str) -> bool;
    /// Restart the named cooldown. With `check_delayed`, fails while it is still running.
    fn try_reset_delay(&self, entity: EntityId, id: &str, check_delayed: bool) -> bool;
    /// Drop every cooldown registered for `entity`.
    fn forget(&self, entity: EntityId);
}

#[cfg_attr(test, mockall::automock)]
pub trait ProjectilePort: Send + Sync {
    /// Detach `entity` if it is embedded in something.
    fn embed_detach(&self, entity: EntityId, user: Option<EntityId>);
}

#[cfg_attr(test, mockall::automock)]
pub trait EventSinkPort: Send + Sync {
    fn publish(&self, event: EngineEvent);
}
