//! Stowage domain: ids, value objects, policy components, prototypes, and the
//! events that drive delayed container transfers.

pub mod components;
pub mod error;
pub mod events;
pub mod ids;
pub mod prototype;
pub mod value_objects;

pub use components::{
    ComponentSet, FrangibleContainerComponent, ParcelWrapComponent, PolicyKind,
    QuickPickupComponent, SpawnAndInsertComponent, WrappedParcelComponent, WrappedParcelVisuals,
};

pub use error::DomainError;

pub use events::{
    AfterInteractEvent, AnimateInsertingEntities, DoAfterCompleted, DoAfterKind, DoAfterRequest,
    EngineEvent, GetVerbsEvent, InteractHandEvent, QuickPickupEvent, ReleaseOutcome, SealOutcome,
    TriggerKind, UseInHandEvent, Verb, VerbAction, VerbCategory,
};

pub use ids::{DoAfterId, EntityId};

pub use prototype::{PrototypeCatalog, PrototypeDef};

pub use value_objects::{
    AmbientToggles, AmbientTrigger, Angle, AuthorityContext, ChargeSpend, ContainerId,
    ContainerKind, ContainerRef, Coordinates, Delay, EntityWhitelist, ItemComponent, ItemShape,
    ItemSize, LimitedCharges, LocKey, PrototypeId, Removal, ShapeBox, SoundSpec,
};
