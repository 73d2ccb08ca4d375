//! Player and enemy poses: snapshots, reference animations, input mapping, history.

pub mod controls;
pub mod history;
pub mod sequence;
pub mod state;

pub use controls::{Control, PoseController};
pub use history::{MoveHistory, RecordedPose};
pub use sequence::ReferenceSequence;
pub use state::{Limb, PoseState};
