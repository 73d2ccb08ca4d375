//! Pose-sequence matching: per-enemy matchers and the arbitrator above them.

pub mod arbitrator;
pub mod matcher;
pub mod report;

pub use arbitrator::MatchArbitrator;
pub use matcher::{ConfidenceWeights, FrameComparison, SequenceMatcher};
pub use report::{Appearance, MatchReport};
