use glam::Vec2;
use riftclimb_collision::CollisionQuery;
use riftclimb_controllers::Frames;
use riftclimb_core::types::{Isometry, Vec3};
use riftclimb_edges::EdgeTracker;
use serde::{Deserialize, Serialize};

/// Sampled once per tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbInput {
    /// x: left/right, y: down/up.
    pub move_axis: Vec2,
    pub climb: bool,
    pub drop: bool,
}

impl ClimbInput {
    #[inline] pub fn idle(&self) -> bool { self.move_axis == Vec2::ZERO }
}

/// What the external locomotion is doing while the climb machine is detached.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ExternalMode {
    #[default]
    Grounded,
    Airborne,
    WallRun,
}

/// Read-only view of the world for one tick.
#[derive(Copy, Clone)]
pub struct ClimbEnv<'a> {
    pub scene: &'a dyn CollisionQuery,
    pub tracker: &'a EdgeTracker,
    pub input: ClimbInput,
    pub mode: ExternalMode,
    pub dt: f32,
    /// Animation driver's root displacement for this tick.
    pub root_motion: Vec3,
}

impl<'a> ClimbEnv<'a> {
    #[inline] pub fn frames(&self, root: Isometry) -> Frames<'a> { Frames::new(root, self.scene) }
}
