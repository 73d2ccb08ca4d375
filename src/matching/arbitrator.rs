//! Decides each frame which enemy, if any, the player is imitating.
//!
//! States, per player:
//! - unmatched: every matcher is searched for a starting point
//! - building: one candidate is tracked and previewed
//! - confirmed: the candidate completed a full cycle; only its matcher runs,
//!   and a grace period absorbs short drops before the match is abandoned

use std::sync::Arc;

use ahash::AHashMap;

use super::matcher::{ConfidenceWeights, SequenceMatcher};
use super::report::{Appearance, MatchReport};
use crate::core::config::MatchConfig;
use crate::core::error::{DisguiseError, Result};
use crate::core::types::{EnemyId, FrameNumber};
use crate::pose::{MoveHistory, PoseState, ReferenceSequence};

#[derive(Debug, Clone)]
pub struct MatchArbitrator {
    /// One matcher per enemy, in creation order
    matchers: Vec<SequenceMatcher>,
    slots: AHashMap<EnemyId, usize>,
    current_candidate: Option<EnemyId>,
    confirmed_candidate: Option<EnemyId>,
    grace_frames_elapsed: u32,
    build_threshold: f32,
    confirm_threshold: f32,
    grace_period: u32,
    warmup_frames: usize,
}

impl MatchArbitrator {
    /// Create one matcher per enemy. Enumeration order is the tie-break order.
    pub fn new<I>(config: &MatchConfig, enemies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EnemyId, Arc<ReferenceSequence>)>,
    {
        config.validate()?;
        let weights = ConfidenceWeights::from(config);

        let mut matchers = Vec::new();
        let mut slots = AHashMap::new();
        for (id, reference) in enemies {
            if slots.insert(id, matchers.len()).is_some() {
                return Err(DisguiseError::DuplicateEnemy(id.to_string()));
            }
            matchers.push(SequenceMatcher::new(id, reference, weights));
        }

        tracing::debug!("Arbitrator created with {} matchers", matchers.len());

        Ok(Self {
            matchers,
            slots,
            current_candidate: None,
            confirmed_candidate: None,
            grace_frames_elapsed: 0,
            build_threshold: config.build_threshold,
            confirm_threshold: config.confirm_threshold,
            grace_period: config.grace_period,
            warmup_frames: config.warmup_frames,
        })
    }

    /// Advance matching by one frame using the latest recorded pose.
    pub fn tick(&mut self, history: &MoveHistory, frame: FrameNumber) -> MatchReport {
        let player_active = history.latest().is_some_and(|p| p.is_active());

        // Warm-up guard: not enough history to judge anything yet
        if history.len() < self.warmup_frames {
            return MatchReport::unmatched(frame, player_active);
        }
        let Some(player) = history.latest().copied() else {
            return MatchReport::unmatched(frame, false);
        };

        match self.confirmed_candidate.or(self.current_candidate) {
            Some(id) => {
                let slot = self.slots[&id];
                let accepted = self.step(slot, &player, frame);
                if self.confirmed_candidate.is_some() {
                    self.resolve_confirmed(slot, accepted, frame);
                } else {
                    self.resolve_building(Some(slot), frame);
                }
            }
            None => {
                let best = self.search(&player, frame);
                self.resolve_building(best, frame);
            }
        }

        self.report(frame, player_active)
    }

    /// Abandon every candidate and reset all matchers.
    pub fn reset(&mut self) {
        self.current_candidate = None;
        self.confirmed_candidate = None;
        self.grace_frames_elapsed = 0;
        for matcher in &mut self.matchers {
            matcher.reset();
        }
    }

    pub fn current_candidate(&self) -> Option<EnemyId> {
        self.current_candidate
    }

    pub fn confirmed_candidate(&self) -> Option<EnemyId> {
        self.confirmed_candidate
    }

    pub fn grace_frames_elapsed(&self) -> u32 {
        self.grace_frames_elapsed
    }

    pub fn matcher(&self, enemy: EnemyId) -> Option<&SequenceMatcher> {
        self.slots.get(&enemy).map(|&slot| &self.matchers[slot])
    }

    pub fn matchers(&self) -> impl Iterator<Item = &SequenceMatcher> {
        self.matchers.iter()
    }

    fn step(&mut self, slot: usize, player: &PoseState, frame: FrameNumber) -> bool {
        let matcher = &mut self.matchers[slot];
        let accepted = matcher.update_match(player, frame);
        if accepted {
            matcher.advance_position();
        }
        accepted
    }

    /// Seed every matcher that has a starting point and keep the best one.
    fn search(&mut self, player: &PoseState, frame: FrameNumber) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        let mut seeded = Vec::new();

        for slot in 0..self.matchers.len() {
            let Some(start) = self.matchers[slot].find_best_starting_position(player) else {
                continue;
            };
            let matcher = &mut self.matchers[slot];
            matcher.reset();
            matcher.set_position(start);
            self.step(slot, player, frame);
            seeded.push(slot);

            let quality = self.matchers[slot].get_match_quality();
            // Strictly greater: ties keep the earlier enemy
            if best.map_or(true, |(_, q)| quality > q) {
                best = Some((slot, quality));
            }
        }

        let best = best.map(|(slot, _)| slot);
        for slot in seeded.into_iter().filter(|&s| Some(s) != best) {
            self.matchers[slot].reset();
        }
        best
    }

    fn resolve_building(&mut self, best: Option<usize>, frame: FrameNumber) {
        let qualified = best.filter(|&slot| self.matchers[slot].get_match_quality() > self.build_threshold);

        let Some(slot) = qualified else {
            if let Some(slot) = best {
                self.matchers[slot].reset();
            }
            if let Some(id) = self.current_candidate.take() {
                tracing::debug!("Frame {}: lost track of {}", frame, id);
            }
            return;
        };

        let matcher = &self.matchers[slot];
        let id = matcher.enemy();
        if self.current_candidate != Some(id) {
            tracing::debug!(
                "Frame {}: tracking {} from position {} (quality {:.2})",
                frame,
                id,
                matcher.match_position(),
                matcher.get_match_quality()
            );
        }
        self.current_candidate = Some(id);

        // A wrap after a mid-cycle seed is not a full cycle yet
        if matcher.has_tracked_full_cycle() {
            tracing::info!(
                "Frame {}: confirmed disguise as {} (quality {:.2})",
                frame,
                id,
                matcher.get_match_quality()
            );
            self.confirmed_candidate = Some(id);
            self.grace_frames_elapsed = 0;
        }
    }

    fn resolve_confirmed(&mut self, slot: usize, accepted: bool, frame: FrameNumber) {
        let quality = self.matchers[slot].get_match_quality();
        if accepted && quality > self.confirm_threshold {
            if self.grace_frames_elapsed > 0 {
                tracing::debug!(
                    "Frame {}: recovered after {} grace frames",
                    frame,
                    self.grace_frames_elapsed
                );
            }
            self.grace_frames_elapsed = 0;
            return;
        }

        self.grace_frames_elapsed += 1;
        if self.grace_frames_elapsed == 1 {
            tracing::debug!("Frame {}: grace period started (quality {:.2})", frame, quality);
        }
        if self.grace_frames_elapsed >= self.grace_period {
            if let Some(id) = self.confirmed_candidate {
                tracing::info!("Frame {}: disguise as {} dropped after grace period", frame, id);
            }
            self.reset();
        }
    }

    fn report(&self, frame: FrameNumber, player_active: bool) -> MatchReport {
        let Some(id) = self.confirmed_candidate.or(self.current_candidate) else {
            return MatchReport::unmatched(frame, player_active);
        };
        let matcher = &self.matchers[self.slots[&id]];
        let confirmed = self.confirmed_candidate.is_some();

        MatchReport {
            frame,
            player_active,
            candidate: Some(id),
            confirmed,
            quality: matcher.get_match_quality(),
            position: matcher.match_position(),
            cycles: matcher.cycles_completed(),
            grace_frames: self.grace_frames_elapsed,
            appearance: if confirmed {
                Appearance::Disguised(id)
            } else {
                Appearance::Previewing(id)
            },
        }
    }
}
