//! Scripted players for headless runs and tests.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::game::enemy::{Enemy, EnemyRoster};
use crate::pose::{Limb, PoseState};

/// Replays an authored pattern, holding each pose for `hold` frames.
///
/// With `jitter > 0` every pose boundary lands up to `jitter` frames early
/// or late. Boundaries are offset from the nominal schedule, so timing
/// errors never accumulate.
#[derive(Debug, Clone)]
pub struct MimicScript {
    pattern: Vec<PoseState>,
    hold: u64,
    jitter: i64,
    rng: ChaCha8Rng,
    frame: u64,
    segment: usize,
    nominal_end: u64,
    segment_end: u64,
}

impl MimicScript {
    pub fn new(pattern: Vec<PoseState>, hold: usize, jitter: usize, seed: u64) -> Self {
        let hold = hold.max(1) as u64;
        // Keep boundaries in order
        let jitter = (jitter as u64).min(hold.saturating_sub(1) / 2) as i64;
        let mut script = Self {
            pattern,
            hold,
            jitter,
            rng: ChaCha8Rng::seed_from_u64(seed),
            frame: 0,
            segment: 0,
            nominal_end: hold,
            segment_end: 0,
        };
        script.segment_end = script.jittered(script.nominal_end);
        script
    }

    /// Imitate an enemy's authored pattern.
    pub fn imitate(enemy: &Enemy, hold: usize, jitter: usize, seed: u64) -> Self {
        Self::new(enemy.pattern.clone(), hold, jitter, seed)
    }

    /// Alternate a pose no enemy in the roster ever shows with idle.
    pub fn decoy(roster: &EnemyRoster, hold: usize, seed: u64) -> Self {
        let unused = active_poses().find(|pose| {
            roster
                .iter()
                .all(|enemy| !enemy.sequence.frames().contains(pose))
        });
        let pattern = match unused {
            Some(pose) => vec![pose, PoseState::idle()],
            None => vec![PoseState::idle()],
        };
        Self::new(pattern, hold, 0, seed)
    }

    /// Pose for the next frame.
    pub fn next_pose(&mut self) -> PoseState {
        if self.pattern.is_empty() {
            return PoseState::idle();
        }
        while self.frame >= self.segment_end {
            self.segment += 1;
            self.nominal_end += self.hold;
            self.segment_end = self.jittered(self.nominal_end);
        }
        self.frame += 1;
        self.pattern[self.segment % self.pattern.len()]
    }

    fn jittered(&mut self, nominal: u64) -> u64 {
        let offset = if self.jitter > 0 {
            self.rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0
        };
        let end = (nominal as i64 + offset).max(self.frame as i64 + 1);
        end as u64
    }
}

impl Iterator for MimicScript {
    type Item = PoseState;

    fn next(&mut self) -> Option<PoseState> {
        Some(self.next_pose())
    }
}

/// Every pose with at least one limb raised.
fn active_poses() -> impl Iterator<Item = PoseState> {
    (1u8..16).map(|bits| {
        Limb::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << *i) != 0)
            .fold(PoseState::idle(), |pose, (_, limb)| pose.with_limb(limb, true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave() -> PoseState {
        PoseState::from_limbs(&[Limb::LeftArm])
    }

    #[test]
    fn test_exact_replay_without_jitter() {
        let mut script = MimicScript::new(vec![wave(), PoseState::idle()], 3, 0, 1);
        let poses: Vec<_> = (0..12).map(|_| script.next_pose()).collect();

        let expected: Vec<_> = [wave(), PoseState::idle()]
            .iter()
            .flat_map(|p| std::iter::repeat(*p).take(3))
            .cycle()
            .take(12)
            .collect();
        assert_eq!(poses, expected);
    }

    #[test]
    fn test_jitter_does_not_drift() {
        let hold = 20;
        let mut script = MimicScript::new(vec![wave(), PoseState::idle()], hold, 4, 7);
        let poses: Vec<_> = script.by_ref().take(2000).collect();

        // Roughly half the frames in each pose, whatever the offsets
        let waving = poses.iter().filter(|p| p.is_active()).count();
        assert!((850..=1150).contains(&waving), "waving for {} frames", waving);

        // Each nominal segment midpoint still shows the nominal pose
        for k in 0..100 {
            let mid = k * hold + hold / 2;
            assert_eq!(poses[mid].is_active(), k % 2 == 0, "segment {}", k);
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let a: Vec<_> = MimicScript::new(vec![wave(), PoseState::idle()], 10, 3, 42).take(200).collect();
        let b: Vec<_> = MimicScript::new(vec![wave(), PoseState::idle()], 10, 3, 42).take(200).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decoy_avoids_roster_poses() {
        let mut roster = EnemyRoster::new();
        roster.add("waver", vec![wave(), PoseState::idle()], 2).unwrap();
        let mut script = MimicScript::decoy(&roster, 2, 0);

        let first = script.next_pose();
        assert!(first.is_active());
        assert_ne!(first, wave());
    }

    #[test]
    fn test_active_poses_are_distinct() {
        let poses: Vec<_> = active_poses().collect();
        assert_eq!(poses.len(), 15);
        assert!(poses.iter().all(|p| p.is_active()));
        let unique: std::collections::HashSet<_> = poses.iter().collect();
        assert_eq!(unique.len(), 15);
    }
}
