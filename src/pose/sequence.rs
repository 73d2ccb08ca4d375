//! Cyclic reference animation an enemy loops through.

use serde::Serialize;

use super::state::PoseState;
use crate::core::error::{DisguiseError, Result};

/// Fixed-length cyclic list of poses. Never empty, never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSequence {
    frames: Vec<PoseState>,
}

impl ReferenceSequence {
    /// Build a sequence from explicit frames.
    pub fn from_frames(name: &str, frames: Vec<PoseState>) -> Result<Self> {
        if frames.is_empty() {
            return Err(DisguiseError::EmptySequence { name: name.to_string() });
        }
        Ok(Self { frames })
    }

    /// Expand an authored pattern by repeating each pose `repeat` times in order.
    pub fn expand(name: &str, pattern: &[PoseState], repeat: usize) -> Result<Self> {
        let frames = pattern
            .iter()
            .flat_map(|pose| std::iter::repeat(*pose).take(repeat))
            .collect();
        Self::from_frames(name, frames)
    }

    /// Number of frames in one cycle (always >= 1).
    pub fn cycle_length(&self) -> usize {
        self.frames.len()
    }

    /// Frame at `index`, wrapping past the end.
    pub fn frame(&self, index: usize) -> &PoseState {
        &self.frames[index % self.frames.len()]
    }

    pub fn frames(&self) -> &[PoseState] {
        &self.frames
    }

    /// Indices of frames with at least one limb raised.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, pose)| pose.is_active())
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::state::Limb;

    #[test]
    fn test_expand_repeats_each_pose() {
        let wave = PoseState::from_limbs(&[Limb::LeftArm]);
        let seq = ReferenceSequence::expand("waver", &[wave, PoseState::idle()], 3).unwrap();

        assert_eq!(seq.cycle_length(), 6);
        assert_eq!(&seq.frames()[..3], &[wave; 3]);
        assert!(seq.frames()[3..].iter().all(|p| p.is_idle()));
    }

    #[test]
    fn test_frame_wraps() {
        let wave = PoseState::from_limbs(&[Limb::LeftArm]);
        let seq = ReferenceSequence::from_frames("waver", vec![wave, PoseState::idle()]).unwrap();
        assert_eq!(*seq.frame(2), wave);
        assert_eq!(*seq.frame(5), PoseState::idle());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = ReferenceSequence::from_frames("ghost", Vec::new()).unwrap_err();
        assert!(matches!(err, DisguiseError::EmptySequence { ref name } if name == "ghost"));

        let wave = PoseState::from_limbs(&[Limb::LeftArm]);
        assert!(ReferenceSequence::expand("ghost", &[wave], 0).is_err());
        assert!(ReferenceSequence::expand("ghost", &[], 10).is_err());
    }

    #[test]
    fn test_active_indices() {
        let kick = PoseState::from_limbs(&[Limb::RightLeg]);
        let seq = ReferenceSequence::from_frames(
            "kicker",
            vec![PoseState::idle(), kick, PoseState::idle(), kick],
        )
        .unwrap();
        let active: Vec<_> = seq.active_indices().collect();
        assert_eq!(active, vec![1, 3]);
    }
}
