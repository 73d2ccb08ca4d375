//! Streaming matcher for one (player, reference sequence) pair.
//!
//! The matcher tracks where in the enemy's cycle the player is expected to
//! be, and a running confidence in `[0, 1]`. Each accepted frame moves the
//! expected position forward; a rejected frame leaves it in place so the
//! player can catch up.

use std::sync::Arc;

use crate::core::config::MatchConfig;
use crate::core::types::{EnemyId, FrameNumber};
use crate::pose::{PoseState, ReferenceSequence};

/// How a player frame relates to the expected reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameComparison {
    /// Limbs are identical.
    Perfect,
    /// Neither pose raises a limb.
    BothIdle,
    /// Both poses raise limbs, but different ones.
    Mismatch,
    /// One pose is active and the other idle.
    Jitter,
}

impl FrameComparison {
    pub fn classify(player: &PoseState, reference: &PoseState) -> Self {
        if player == reference {
            return FrameComparison::Perfect;
        }
        match (player.is_active(), reference.is_active()) {
            (false, false) => FrameComparison::BothIdle,
            (true, true) => FrameComparison::Mismatch,
            _ => FrameComparison::Jitter,
        }
    }
}

/// Reward and decay constants applied per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceWeights {
    pub reward: f32,
    pub idle_decay: f32,
    pub mixed_decay: f32,
    pub mismatch_decay: f32,
}

impl From<&MatchConfig> for ConfidenceWeights {
    fn from(config: &MatchConfig) -> Self {
        Self {
            reward: config.match_reward,
            idle_decay: config.idle_decay,
            mixed_decay: config.mixed_decay,
            mismatch_decay: config.mismatch_decay,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    enemy: EnemyId,
    reference: Arc<ReferenceSequence>,
    weights: ConfidenceWeights,
    match_position: usize,
    cycles_completed: u32,
    /// Positions advanced since the last reset
    frames_tracked: usize,
    confidence: f32,
    last_match_frame: Option<FrameNumber>,
    is_active: bool,
}

impl SequenceMatcher {
    pub fn new(enemy: EnemyId, reference: Arc<ReferenceSequence>, weights: ConfidenceWeights) -> Self {
        Self {
            enemy,
            reference,
            weights,
            match_position: 0,
            cycles_completed: 0,
            frames_tracked: 0,
            confidence: 0.0,
            last_match_frame: None,
            is_active: false,
        }
    }

    /// First index whose frame is active and equal to `player`.
    ///
    /// Idle poses never seed a match: every sequence has idle frames.
    pub fn find_best_starting_position(&self, player: &PoseState) -> Option<usize> {
        if player.is_idle() {
            return None;
        }
        self.reference
            .active_indices()
            .find(|&i| self.reference.frame(i) == player)
    }

    /// Compare `player` with the expected frame and adjust confidence.
    ///
    /// Returns true when the caller should advance the position.
    pub fn update_match(&mut self, player: &PoseState, frame: FrameNumber) -> bool {
        let expected = *self.reference.frame(self.match_position);

        let matched = match FrameComparison::classify(player, &expected) {
            FrameComparison::Perfect => {
                self.adjust(self.weights.reward);
                self.last_match_frame = Some(frame);
                self.is_active = player.is_active();
                true
            }
            // Unreachable while equality covers limbs only: two idle poses
            // compare equal and take `Perfect`, so `idle_decay` never applies.
            FrameComparison::BothIdle => {
                self.adjust(-self.weights.idle_decay);
                self.last_match_frame = Some(frame);
                self.is_active = false;
                true
            }
            FrameComparison::Mismatch => {
                self.adjust(-self.weights.mismatch_decay);
                self.is_active = false;
                false
            }
            // Non-fatal: a transition a few frames early or late
            FrameComparison::Jitter => {
                self.adjust(-self.weights.mixed_decay);
                self.is_active = false;
                true
            }
        };

        tracing::trace!(
            "{} frame {}: player {} vs expected {} at {} -> {}",
            self.enemy,
            frame,
            player,
            expected,
            self.match_position,
            if matched { "accepted" } else { "rejected" }
        );

        matched
    }

    /// Move to the next expected frame, counting a cycle on wrap.
    pub fn advance_position(&mut self) {
        self.match_position += 1;
        self.frames_tracked = self.frames_tracked.saturating_add(1);
        if self.match_position >= self.reference.cycle_length() {
            self.match_position = 0;
            self.cycles_completed = self.cycles_completed.saturating_add(1);
        }
    }

    /// Seed the expected position (wraps past the end).
    pub fn set_position(&mut self, index: usize) {
        self.match_position = index % self.reference.cycle_length();
    }

    pub fn reset(&mut self) {
        self.match_position = 0;
        self.cycles_completed = 0;
        self.frames_tracked = 0;
        self.confidence = 0.0;
        self.last_match_frame = None;
        self.is_active = false;
    }

    pub fn get_match_quality(&self) -> f32 {
        self.confidence
    }

    pub fn is_full_cycle_complete(&self) -> bool {
        self.cycles_completed > 0 && self.match_position == 0
    }

    /// True once at least one whole cycle's worth of frames was followed
    /// since the last reset, wherever tracking started.
    pub fn has_tracked_full_cycle(&self) -> bool {
        self.cycles_completed > 0 && self.frames_tracked >= self.reference.cycle_length()
    }

    pub fn frames_tracked(&self) -> usize {
        self.frames_tracked
    }

    pub fn enemy(&self) -> EnemyId {
        self.enemy
    }

    pub fn reference(&self) -> &ReferenceSequence {
        &self.reference
    }

    pub fn match_position(&self) -> usize {
        self.match_position
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn last_match_frame(&self) -> Option<FrameNumber> {
        self.last_match_frame
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn adjust(&mut self, delta: f32) {
        self.confidence = (self.confidence + delta).clamp(0.0, 1.0);
    }
}
