//! Value objects - Immutable objects defined by their attributes

mod ambient;
mod authority;
mod charges;
mod container;
mod delay;
mod geometry;
mod item;
mod names;
mod whitelist;

pub use ambient::{AmbientToggles, AmbientTrigger};
pub use authority::AuthorityContext;
pub use charges::{ChargeSpend, LimitedCharges};
pub use container::{ContainerKind, ContainerRef, Removal};
pub use delay::Delay;
pub use geometry::{Angle, Coordinates};
pub use item::{ItemComponent, ItemShape, ItemSize, ShapeBox};
pub use names::{ContainerId, LocKey, PrototypeId, SoundSpec};
pub use whitelist::EntityWhitelist;
