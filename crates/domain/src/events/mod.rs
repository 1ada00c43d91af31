//! Engine events
//!
//! Trigger events flow in from the host's interaction layer, completion
//! events flow back from the timed-action scheduler, and advisory events flow
//! out to presentation layers.
//!
//! ## Outcomes
//!
//! `transfer_events` holds the return types of commit operations, describing
//! what moved where.

pub mod advisory;
pub mod do_after;
pub mod interaction;
pub mod transfer_events;
pub mod verbs;

pub use advisory::*;
pub use do_after::*;
pub use interaction::*;
pub use transfer_events::*;
pub use verbs::*;
