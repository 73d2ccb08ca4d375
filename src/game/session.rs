//! One player's disguise session: the per-frame loop around the matcher.
//!
//! Each tick runs input sampling, history recording, arbitration and the
//! frame advance in that order, so a report only ever reflects the frame
//! it was produced on.

use crate::core::config::MatchConfig;
use crate::core::error::Result;
use crate::core::types::{EnemyId, FrameNumber};
use crate::game::enemy::EnemyRoster;
use crate::matching::{MatchArbitrator, MatchReport};
use crate::pose::{Control, MoveHistory, PoseController, PoseState};

pub struct DisguiseSession {
    config: MatchConfig,
    roster: EnemyRoster,
    controller: PoseController,
    history: MoveHistory,
    arbitrator: MatchArbitrator,
    frame: FrameNumber,
}

impl DisguiseSession {
    pub fn new(config: MatchConfig, roster: EnemyRoster) -> Result<Self> {
        let arbitrator = MatchArbitrator::new(&config, roster.sequences())?;
        Ok(Self {
            controller: PoseController::new(config.signal_duration),
            history: MoveHistory::new(config.history_capacity),
            arbitrator,
            roster,
            config,
            frame: 0,
        })
    }

    /// Apply this frame's control presses and run one tick
    pub fn tick(&mut self, presses: &[Control]) -> MatchReport {
        for &control in presses {
            self.controller.press(control);
        }
        let pose = self.controller.pose();
        let report = self.observe(pose);
        self.controller.advance();
        report
    }

    /// Run one tick with a pose supplied directly (scripted players)
    pub fn tick_pose(&mut self, pose: PoseState) -> MatchReport {
        self.observe(pose)
    }

    fn observe(&mut self, pose: PoseState) -> MatchReport {
        self.history.push(self.frame, pose);
        let report = self.arbitrator.tick(&self.history, self.frame);
        self.frame += 1;
        report
    }

    /// Each enemy's animation frame for the upcoming tick
    pub fn enemy_poses(&self) -> impl Iterator<Item = (EnemyId, &PoseState)> + '_ {
        self.roster.iter().map(move |e| (e.id, e.pose_at(self.frame)))
    }

    /// Start over: clear history, inputs and all matching state
    pub fn restart(&mut self) {
        self.history.clear();
        self.controller.release_all();
        self.arbitrator.reset();
        self.frame = 0;
    }

    pub fn frame(&self) -> FrameNumber {
        self.frame
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn roster(&self) -> &EnemyRoster {
        &self.roster
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn arbitrator(&self) -> &MatchArbitrator {
        &self.arbitrator
    }
}
