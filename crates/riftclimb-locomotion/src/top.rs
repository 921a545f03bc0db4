use riftclimb_collision::CollisionQuery;
use riftclimb_core::{math::horizontal_dir, types::Vec3};
use tracing::debug;

use crate::input::ClimbEnv;
use crate::machine::ClimbMachine;
use crate::state::ClimbState;

impl ClimbMachine {
    /// Mantle when there is floor above and past the grab with room to stand on it.
    pub(crate) fn wall_top(&mut self, env: &ClimbEnv) -> bool {
        if self.busy() || env.input.move_axis.y <= 0.0 { return false; }
        let s = self.cfg.wall_top;
        let f = env.frames(self.root);
        let point = self.hooking.hooking_point(&f)
            + horizontal_dir(-self.hooking.normal) * s.forward_position
            + Vec3::Y * s.position_y;
        if env.scene.raycast(point, -Vec3::Y, s.floor_detection_distance).is_none() { return false; }
        if env.scene.check_sphere(point, s.radius) {
            debug!(?point, "wall top blocked");
            return false;
        }
        self.change_state(ClimbState::ClimbToTop, env)
    }
}
