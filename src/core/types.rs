//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Stable identifier for an enemy, assigned in roster creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl EnemyId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Game frame counter (one per simulation tick)
pub type FrameNumber = u64;
