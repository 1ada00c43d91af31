//! Use cases - Interaction orchestration.
//!
//! Each module handles the triggers for one transfer policy.
//! Shared commit logic lives in `transfer`; timing in `delayed`; world-event
//! releases in `ambient`; routing in `dispatch`.

pub mod ambient;
pub mod delayed;
pub mod dispatch;
pub mod frangible;
pub mod parcel_wrap;
pub mod quick_pickup;
pub mod spawn_insert;
pub mod transfer;

// Re-export main types
pub use ambient::{AmbientReleaser, AmbientTriggerAdapter};
pub use delayed::{DelayedActionBridge, DelayedOutcome};
pub use dispatch::InteractionDispatcher;
pub use frangible::FrangibleContainers;
pub use parcel_wrap::ParcelWrapping;
pub use quick_pickup::{QuickPickup, QuickPickupListener, StorageQuickPickup};
pub use spawn_insert::SpawnAndInsert;
pub use transfer::{TransferError, TransferOrchestrator};
