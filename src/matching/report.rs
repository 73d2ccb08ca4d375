//! Per-tick matching result handed to rendering.

use serde::Serialize;

use crate::core::types::{EnemyId, FrameNumber};

/// What the player should look like this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "enemy", rename_all = "snake_case")]
pub enum Appearance {
    #[default]
    Default,
    /// Building a match; previewing the candidate's look.
    Previewing(EnemyId),
    /// Confirmed (possibly within the grace period).
    Disguised(EnemyId),
}

impl Appearance {
    pub fn enemy(&self) -> Option<EnemyId> {
        match self {
            Appearance::Default => None,
            Appearance::Previewing(id) | Appearance::Disguised(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub frame: FrameNumber,
    /// Whether the player currently raises any limb
    pub player_active: bool,
    /// Enemy being tracked or confirmed, if any
    pub candidate: Option<EnemyId>,
    pub confirmed: bool,
    pub quality: f32,
    pub position: usize,
    pub cycles: u32,
    pub grace_frames: u32,
    pub appearance: Appearance,
}

impl MatchReport {
    /// Report for a frame with no tracked candidate.
    pub fn unmatched(frame: FrameNumber, player_active: bool) -> Self {
        Self {
            frame,
            player_active,
            candidate: None,
            confirmed: false,
            quality: 0.0,
            position: 0,
            cycles: 0,
            grace_frames: 0,
            appearance: Appearance::Default,
        }
    }

    pub fn is_disguised_as(&self, enemy: EnemyId) -> bool {
        self.confirmed && self.candidate == Some(enemy)
    }
}
