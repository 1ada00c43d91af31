//! Transfer use cases: applicability, commit, and completion cues.

mod applicability;
mod cue;
mod error;
mod orchestrator;

pub use applicability::{Applicability, Inapplicable, TransferRule};
pub use cue::{Cue, CueAnchor, CueMode};
pub use error::TransferError;
pub use orchestrator::{HolderSizing, ReleasePlan, SealPlan, TransferOrchestrator};
