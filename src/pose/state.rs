//! Discrete body-pose snapshot.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A limb the player (or an enemy) can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limb {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Limb {
    pub const ALL: [Limb; 4] = [Limb::LeftArm, Limb::RightArm, Limb::LeftLeg, Limb::RightLeg];
}

/// Instantaneous pose: which limbs are raised and whether the signal light blinks.
///
/// Equality and hashing only look at the limbs; the signal is cosmetic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoseState {
    pub left_arm_raised: bool,
    pub right_arm_raised: bool,
    pub left_leg_raised: bool,
    pub right_leg_raised: bool,
    pub signal_active: bool,
}

impl PoseState {
    /// All limbs down, signal off.
    pub const fn idle() -> Self {
        Self {
            left_arm_raised: false,
            right_arm_raised: false,
            left_leg_raised: false,
            right_leg_raised: false,
            signal_active: false,
        }
    }

    pub fn from_limbs(limbs: &[Limb]) -> Self {
        limbs.iter().fold(Self::idle(), |pose, &limb| pose.with_limb(limb, true))
    }

    pub fn with_limb(mut self, limb: Limb, raised: bool) -> Self {
        *self.limb_mut(limb) = raised;
        self
    }

    pub fn with_signal(mut self, active: bool) -> Self {
        self.signal_active = active;
        self
    }

    pub fn is_raised(&self, limb: Limb) -> bool {
        match limb {
            Limb::LeftArm => self.left_arm_raised,
            Limb::RightArm => self.right_arm_raised,
            Limb::LeftLeg => self.left_leg_raised,
            Limb::RightLeg => self.right_leg_raised,
        }
    }

    pub(crate) fn limb_mut(&mut self, limb: Limb) -> &mut bool {
        match limb {
            Limb::LeftArm => &mut self.left_arm_raised,
            Limb::RightArm => &mut self.right_arm_raised,
            Limb::LeftLeg => &mut self.left_leg_raised,
            Limb::RightLeg => &mut self.right_leg_raised,
        }
    }

    pub fn raised_limbs(&self) -> impl Iterator<Item = Limb> + '_ {
        Limb::ALL.into_iter().filter(move |&limb| self.is_raised(limb))
    }

    /// True if any limb is raised.
    pub fn is_active(&self) -> bool {
        self.left_arm_raised || self.right_arm_raised || self.left_leg_raised || self.right_leg_raised
    }

    pub fn is_idle(&self) -> bool {
        !self.is_active()
    }

    fn limb_bits(&self) -> u8 {
        (self.left_arm_raised as u8)
            | (self.right_arm_raised as u8) << 1
            | (self.left_leg_raised as u8) << 2
            | (self.right_leg_raised as u8) << 3
    }
}

impl PartialEq for PoseState {
    fn eq(&self, other: &Self) -> bool {
        self.limb_bits() == other.limb_bits()
    }
}

impl Eq for PoseState {}

impl Hash for PoseState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limb_bits().hash(state);
    }
}

impl std::fmt::Display for PoseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_idle() {
            return write!(f, "idle");
        }
        let names: Vec<&str> = self
            .raised_limbs()
            .map(|limb| match limb {
                Limb::LeftArm => "left_arm",
                Limb::RightArm => "right_arm",
                Limb::LeftLeg => "left_leg",
                Limb::RightLeg => "right_leg",
            })
            .collect();
        write!(f, "{}", names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_idle_is_not_active() {
        let pose = PoseState::idle();
        assert!(pose.is_idle());
        assert!(!pose.is_active());
        assert_eq!(pose, PoseState::default());
    }

    #[test]
    fn test_any_limb_makes_active() {
        for limb in Limb::ALL {
            let pose = PoseState::from_limbs(&[limb]);
            assert!(pose.is_active(), "{:?} should be active", limb);
            assert!(pose.is_raised(limb));
        }
    }

    #[test]
    fn test_signal_ignored_by_equality() {
        let lit = PoseState::from_limbs(&[Limb::LeftArm]).with_signal(true);
        let dark = PoseState::from_limbs(&[Limb::LeftArm]);
        assert_eq!(lit, dark);
        assert!(!PoseState::idle().with_signal(true).is_active());
    }

    #[test]
    fn test_equal_poses_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PoseState::from_limbs(&[Limb::RightLeg]).with_signal(true));
        assert!(set.contains(&PoseState::from_limbs(&[Limb::RightLeg])));
    }

    #[test]
    fn test_raised_limbs_and_display() {
        let pose = PoseState::from_limbs(&[Limb::RightLeg, Limb::LeftArm]);
        let limbs: Vec<_> = pose.raised_limbs().collect();
        assert_eq!(limbs, vec![Limb::LeftArm, Limb::RightLeg]);
        assert_eq!(pose.to_string(), "left_arm+right_leg");
        assert_eq!(PoseState::idle().to_string(), "idle");
    }

    fn any_pose() -> impl Strategy<Value = PoseState> {
        any::<[bool; 5]>().prop_map(|b| PoseState {
            left_arm_raised: b[0],
            right_arm_raised: b[1],
            left_leg_raised: b[2],
            right_leg_raised: b[3],
            signal_active: b[4],
        })
    }

    proptest! {
        #[test]
        fn prop_equality_reflexive(a in any_pose()) {
            prop_assert_eq!(a, a);
        }

        #[test]
        fn prop_equality_symmetric(a in any_pose(), b in any_pose()) {
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn prop_equality_ignores_signal(a in any_pose(), signal in any::<bool>()) {
            prop_assert_eq!(a, a.with_signal(signal));
        }
    }
}
