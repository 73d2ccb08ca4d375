//! Enemies and the roster that owns them.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::core::config::MatchConfig;
use crate::core::error::{DisguiseError, Result};
use crate::core::types::{EnemyId, FrameNumber};
use crate::pose::{Limb, PoseState, ReferenceSequence};

/// An enemy looping through its authored animation
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    /// Authored poses before expansion
    pub pattern: Vec<PoseState>,
    pub sequence: Arc<ReferenceSequence>,
}

impl Enemy {
    /// The animation frame shown on `frame`
    pub fn pose_at(&self, frame: FrameNumber) -> &PoseState {
        let len = self.sequence.cycle_length() as FrameNumber;
        self.sequence.frame((frame % len) as usize)
    }
}

/// All enemies of a session, in creation order
#[derive(Debug, Clone, Default)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy whose sequence repeats each authored pose `frames_per_pose` times
    pub fn add(&mut self, name: &str, pattern: Vec<PoseState>, frames_per_pose: usize) -> Result<EnemyId> {
        if self.by_name(name).is_some() {
            return Err(DisguiseError::DuplicateEnemy(name.to_string()));
        }
        let sequence = ReferenceSequence::expand(name, &pattern, frames_per_pose)?;
        let id = EnemyId(self.enemies.len() as u32);

        tracing::debug!(
            "Added enemy {} '{}' with a {} frame cycle",
            id,
            name,
            sequence.cycle_length()
        );

        self.enemies.push(Enemy {
            id,
            name: name.to_string(),
            pattern,
            sequence: Arc::new(sequence),
        });
        Ok(id)
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id.0 as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// (id, sequence) pairs for building matchers
    pub fn sequences(&self) -> impl Iterator<Item = (EnemyId, Arc<ReferenceSequence>)> + '_ {
        self.enemies.iter().map(|e| (e.id, Arc::clone(&e.sequence)))
    }

    /// Load a roster from a TOML file
    pub fn load(path: &Path, config: &MatchConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, config)
    }

    /// Parse a roster from TOML; order in the file is creation order
    pub fn from_toml_str(content: &str, config: &MatchConfig) -> Result<Self> {
        let toml_data: TomlRoster = toml::from_str(content)?;

        let mut roster = Self::new();
        for enemy in toml_data.enemies {
            let pattern = enemy.pattern.iter().map(|limbs| PoseState::from_limbs(limbs)).collect();
            roster.add(&enemy.name, pattern, config.frames_per_pose)?;
        }
        tracing::info!("Loaded {} enemies", roster.len());
        Ok(roster)
    }
}

/// TOML representation of a roster file
#[derive(Debug, Deserialize)]
struct TomlRoster {
    #[serde(default)]
    enemies: Vec<TomlEnemy>,
}

/// TOML representation of one enemy; each pose lists its raised limbs
#[derive(Debug, Deserialize)]
struct TomlEnemy {
    name: String,
    pattern: Vec<Vec<Limb>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave() -> PoseState {
        PoseState::from_limbs(&[Limb::LeftArm])
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let mut roster = EnemyRoster::new();
        let a = roster.add("waver", vec![wave(), PoseState::idle()], 2).unwrap();
        let b = roster.add("kicker", vec![PoseState::from_limbs(&[Limb::RightLeg])], 2).unwrap();

        assert_eq!(a, EnemyId(0));
        assert_eq!(b, EnemyId(1));
        let names: Vec<_> = roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["waver", "kicker"]);
        assert_eq!(roster.get(b).unwrap().name, "kicker");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut roster = EnemyRoster::new();
        roster.add("waver", vec![wave()], 1).unwrap();
        let err = roster.add("waver", vec![wave()], 1).unwrap_err();
        assert!(matches!(err, DisguiseError::DuplicateEnemy(_)));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let mut roster = EnemyRoster::new();
        let err = roster.add("ghost", Vec::new(), 10).unwrap_err();
        assert!(matches!(err, DisguiseError::EmptySequence { .. }));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_pose_at_loops_animation() {
        let mut roster = EnemyRoster::new();
        let id = roster.add("waver", vec![wave(), PoseState::idle()], 3).unwrap();
        let enemy = roster.get(id).unwrap();

        assert_eq!(*enemy.pose_at(0), wave());
        assert_eq!(*enemy.pose_at(3), PoseState::idle());
        assert_eq!(*enemy.pose_at(6), wave());
        assert_eq!(*enemy.pose_at(6 * 1000 + 5), PoseState::idle());
    }

    #[test]
    fn test_parse_roster_toml() {
        let toml_str = r#"
[[enemies]]
name = "waver"
pattern = [["left_arm"], []]

[[enemies]]
name = "star"
pattern = [["left_arm", "right_arm", "left_leg", "right_leg"]]
"#;
        let config = MatchConfig {
            frames_per_pose: 4,
            ..MatchConfig::default()
        };
        let roster = EnemyRoster::from_toml_str(toml_str, &config).unwrap();

        assert_eq!(roster.len(), 2);
        let waver = roster.by_name("waver").unwrap();
        assert_eq!(waver.sequence.cycle_length(), 8);
        assert_eq!(waver.pattern, vec![wave(), PoseState::idle()]);

        let star = roster.by_name("star").unwrap();
        assert_eq!(star.pattern[0].raised_limbs().count(), 4);
    }

    #[test]
    fn test_unknown_limb_is_parse_error() {
        let toml_str = "[[enemies]]\nname = \"tail\"\npattern = [[\"tail\"]]\n";
        let err = EnemyRoster::from_toml_str(toml_str, &MatchConfig::default()).unwrap_err();
        assert!(matches!(err, DisguiseError::TomlError(_)));
    }
}
