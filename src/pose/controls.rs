//! Maps discrete control presses onto the player's pose.
//!
//! Limb controls toggle: one press raises, the next lowers. The signal
//! control lights the signal for a fixed number of frames.

use serde::{Deserialize, Serialize};

use super::state::{Limb, PoseState};

/// A discrete player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Signal,
}

impl Control {
    /// The limb a control toggles, if any.
    pub fn limb(self) -> Option<Limb> {
        match self {
            Control::LeftArm => Some(Limb::LeftArm),
            Control::RightArm => Some(Limb::RightArm),
            Control::LeftLeg => Some(Limb::LeftLeg),
            Control::RightLeg => Some(Limb::RightLeg),
            Control::Signal => None,
        }
    }
}

/// Holds toggled limb state and the signal countdown.
#[derive(Debug, Clone)]
pub struct PoseController {
    limbs: PoseState,
    signal_frames_left: u32,
    signal_duration: u32,
}

impl PoseController {
    pub fn new(signal_duration: u32) -> Self {
        Self {
            limbs: PoseState::idle(),
            signal_frames_left: 0,
            signal_duration,
        }
    }

    /// Apply one control press.
    pub fn press(&mut self, control: Control) {
        match control.limb() {
            Some(limb) => {
                let raised = self.limbs.limb_mut(limb);
                *raised = !*raised;
            }
            None => self.signal_frames_left = self.signal_duration,
        }
    }

    /// Sample the current pose.
    pub fn pose(&self) -> PoseState {
        self.limbs.with_signal(self.signal_frames_left > 0)
    }

    /// Advance the signal countdown by one frame.
    pub fn advance(&mut self) {
        self.signal_frames_left = self.signal_frames_left.saturating_sub(1);
    }

    /// Lower every limb and extinguish the signal.
    pub fn release_all(&mut self) {
        self.limbs = PoseState::idle();
        self.signal_frames_left = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_toggles_limb() {
        let mut controller = PoseController::new(10);
        controller.press(Control::LeftArm);
        assert!(controller.pose().left_arm_raised);

        controller.press(Control::LeftArm);
        assert!(controller.pose().is_idle());
    }

    #[test]
    fn test_limbs_are_independent() {
        let mut controller = PoseController::new(10);
        controller.press(Control::LeftArm);
        controller.press(Control::RightLeg);
        assert_eq!(controller.pose(), PoseState::from_limbs(&[Limb::LeftArm, Limb::RightLeg]));
    }

    #[test]
    fn test_signal_lasts_fixed_frames() {
        let mut controller = PoseController::new(3);
        controller.press(Control::Signal);

        for _ in 0..3 {
            assert!(controller.pose().signal_active);
            controller.advance();
        }
        assert!(!controller.pose().signal_active);
    }

    #[test]
    fn test_signal_does_not_make_pose_active() {
        let mut controller = PoseController::new(3);
        controller.press(Control::Signal);
        assert!(controller.pose().is_idle());
    }

    #[test]
    fn test_retrigger_restarts_signal() {
        let mut controller = PoseController::new(2);
        controller.press(Control::Signal);
        controller.advance();
        controller.press(Control::Signal);
        controller.advance();
        assert!(controller.pose().signal_active);
    }

    #[test]
    fn test_release_all() {
        let mut controller = PoseController::new(5);
        controller.press(Control::RightArm);
        controller.press(Control::Signal);
        controller.release_all();
        assert!(controller.pose().is_idle());
        assert!(!controller.pose().signal_active);
    }
}
