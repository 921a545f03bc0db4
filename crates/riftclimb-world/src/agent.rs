use riftclimb_core::types::{Isometry, Vec3};
use riftclimb_edges::EdgeTracker;
use riftclimb_locomotion::{ClimbInput, ClimbMachine, ExternalMode, StateKind};
use serde::{Deserialize, Serialize};

use crate::anim::AnimParams;
use crate::profile::ClimbProfile;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// One climber: its root pose, edge tracker and climb machine.
pub struct Agent {
    pub id: AgentId,
    pub root: Isometry,
    pub tracker: EdgeTracker,
    pub machine: ClimbMachine,
    pub input: ClimbInput,
    pub mode: ExternalMode,
    pub root_motion: Vec3,
}

impl Agent {
    pub fn new(id: AgentId, root: Isometry, profile: &ClimbProfile) -> Self {
        Self {
            id,
            root,
            tracker: EdgeTracker::new(profile.edges),
            machine: ClimbMachine::new(profile.climb, root),
            input: ClimbInput::default(),
            mode: ExternalMode::default(),
            root_motion: Vec3::ZERO,
        }
    }

    pub fn anim_params(&self) -> AnimParams {
        let kind = self.machine.kind();
        let detached = kind == StateKind::Detached;
        AnimParams {
            climbing: kind.hooked(),
            wall_run: detached && self.mode == ExternalMode::WallRun,
            climb_to_top: kind == StateKind::ClimbToTop,
            grounded: detached && self.mode == ExternalMode::Grounded,
            hanging_blend: self.machine.hanging_blend(),
        }
    }
}
