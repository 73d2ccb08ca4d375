//! Matching configuration with documented constants
//!
//! All tuning numbers for the pose matcher live here, with notes on how
//! they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{DisguiseError, Result};

/// Configuration for the pose-matching systems
///
/// Values are in frames (one per tick) or in confidence units on `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === CONFIDENCE MODEL ===
    /// Confidence gained when the player's pose equals the expected frame
    ///
    /// At 0.1, ten consecutive correct frames saturate confidence.
    pub match_reward: f32,

    /// Confidence lost when both poses are idle
    ///
    /// Idle frames normally cost nothing.
    pub idle_decay: f32,

    /// Confidence lost when one pose is active and the other idle
    ///
    /// This is timing jitter around a pose change. Kept small so a player
    /// a few frames early or late on a transition is barely penalised.
    pub mixed_decay: f32,

    /// Confidence lost when both poses are active but differ
    ///
    /// The only genuinely wrong move. Two of these undo four good frames.
    pub mismatch_decay: f32,

    // === ARBITRATION ===
    /// Quality a candidate must exceed to be previewed
    ///
    /// Must be below `match_reward`, otherwise a freshly seeded matcher
    /// could never qualify.
    pub build_threshold: f32,

    /// Quality a confirmed candidate must exceed to hold without grace
    pub confirm_threshold: f32,

    /// Frames a confirmed match survives without holding
    ///
    /// At 60 fps, 30 frames is half a second of tolerance.
    pub grace_period: u32,

    /// Number of recorded history frames required before matching runs
    pub warmup_frames: usize,

    // === HISTORY & ANIMATION ===
    /// Maximum number of poses kept in the move history
    pub history_capacity: usize,

    /// How many times each authored pose is repeated in a reference sequence
    ///
    /// At 150, a two-pose pattern yields a 300 frame cycle.
    pub frames_per_pose: usize,

    /// Frames the signal light stays lit after being triggered
    pub signal_duration: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            // Confidence (mismatch > mixed > idle)
            match_reward: 0.1,
            idle_decay: 0.0,
            mixed_decay: 0.005,
            mismatch_decay: 0.2,

            // Arbitration
            build_threshold: 0.05,
            confirm_threshold: 0.5,
            grace_period: 30,
            warmup_frames: 5,

            // History & animation
            history_capacity: 600,
            frames_per_pose: 150,
            signal_duration: 30,
        }
    }
}

impl MatchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("match_reward", self.match_reward),
            ("idle_decay", self.idle_decay),
            ("mixed_decay", self.mixed_decay),
            ("mismatch_decay", self.mismatch_decay),
            ("build_threshold", self.build_threshold),
            ("confirm_threshold", self.confirm_threshold),
        ];
        for (name, value) in unit_fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DisguiseError::InvalidConfig(format!(
                    "{} ({}) must be a finite value in [0, 1]",
                    name, value
                )));
            }
        }

        if self.build_threshold > self.confirm_threshold {
            return Err(DisguiseError::InvalidConfig(format!(
                "build_threshold ({}) should be <= confirm_threshold ({})",
                self.build_threshold, self.confirm_threshold
            )));
        }

        if self.match_reward <= self.build_threshold {
            return Err(DisguiseError::InvalidConfig(format!(
                "match_reward ({}) must exceed build_threshold ({})",
                self.match_reward, self.build_threshold
            )));
        }

        if self.grace_period == 0 {
            return Err(DisguiseError::InvalidConfig("grace_period must be at least 1".into()));
        }

        if self.warmup_frames == 0 || self.warmup_frames > self.history_capacity {
            return Err(DisguiseError::InvalidConfig(format!(
                "warmup_frames ({}) must be in 1..={} (history_capacity)",
                self.warmup_frames, self.history_capacity
            )));
        }

        if self.frames_per_pose == 0 {
            return Err(DisguiseError::InvalidConfig("frames_per_pose must be at least 1".into()));
        }

        Ok(())
    }
}
