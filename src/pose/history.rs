use std::collections::VecDeque;

use serde::Serialize;

use super::state::PoseState;
use crate::core::types::FrameNumber;

/// A pose recorded on a given frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordedPose {
    pub frame: FrameNumber,
    pub pose: PoseState,
}

/// Bounded log of the player's recent poses, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct MoveHistory {
    entries: VecDeque<RecordedPose>,
    capacity: usize,
}

impl MoveHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, frame: FrameNumber, pose: PoseState) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front(); // Remove oldest
        }
        self.entries.push_back(RecordedPose { frame, pose });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded pose
    pub fn latest(&self) -> Option<&PoseState> {
        self.entries.back().map(|e| &e.pose)
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &RecordedPose> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Entries recorded on or after `frame`
    pub fn since(&self, frame: FrameNumber) -> impl Iterator<Item = &RecordedPose> {
        self.entries.iter().filter(move |e| e.frame >= frame)
    }

    /// Number of times the recorded pose changed between consecutive entries
    pub fn transitions(&self) -> usize {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .filter(|(a, b)| a.pose != b.pose)
            .count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new(600)
    }
}
