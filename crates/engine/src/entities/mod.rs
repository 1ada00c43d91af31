//! Entity modules - capability wrappers over the world ports.
//!
//! They own no transfer logic; use cases build on them.

pub mod container_binding;
pub mod spawner;

pub use container_binding::ContainerBinding;
pub use spawner::Spawner;
