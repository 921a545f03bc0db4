//! Grabs on free-climbable surfaces, found by short rays around the current grab.
use riftclimb_collision::{CollisionQuery, RayHit, Tag};
use riftclimb_controllers::{
    helpers::{hand_position, Side},
    Parent,
};
use riftclimb_core::{math::horizontal_dir, types::Vec3};

use crate::guard::HorizontalDir;
use crate::input::{ClimbEnv, ClimbInput};
use crate::machine::ClimbMachine;
use crate::state::ClimbState;

/// How far behind the grab the forward ray starts.
const FORWARD_BACKOFF: f32 = 0.4;
/// How far in front of the grab the edge-side rays start.
const EDGE_RAY_FORWARD: f32 = 0.1;

impl ClimbMachine {
    /// Offset of the next free grab along the input direction.
    fn climb_dir(&self, input: &ClimbInput) -> Vec3 {
        let th = self.cfg.climb.edge_swap_threshold_y;
        let right = self.root.rot * Vec3::X;
        let m = input.move_axis;
        if m.x > 0.0 {
            right * th
        } else if m.x < 0.0 {
            -right * th
        } else if m.y > 0.0 {
            Vec3::Y * th
        } else if m.y < 0.0 {
            -Vec3::Y * th
        } else {
            Vec3::ZERO
        }
    }

    /// Lateral moves lead with the hand on that side; vertical moves alternate.
    fn lead_for(&mut self, input: &ClimbInput) -> Side {
        let m = input.move_axis;
        let lead = if m.x > 0.0 {
            Side::Right
        } else if m.x < 0.0 {
            Side::Left
        } else {
            self.free_lead.other()
        };
        self.free_lead = lead;
        lead
    }

    /// Nearest free-climbable hit along the ray, looking through other geometry.
    fn find_hooking_point(&self, env: &ClimbEnv, origin: Vec3, dir: Vec3) -> Option<RayHit> {
        env.scene
            .raycast_all(origin, dir, self.cfg.climb.free_ray_length)
            .into_iter()
            .find(|h| h.tag == Tag::FreeClimbable)
    }

    fn free_climb(&mut self, env: &ClimbEnv, hit: RayHit, change_state: bool) -> bool {
        let hp = self.cfg.hand;
        let n = horizontal_dir(hit.normal);
        let fwd = -n * hp.forward_position;
        let lead = self.lead_for(&env.input);
        let first = hand_position(hit.point, hp.y_offset, self.hooking.pair(lead).grab_offset(n, hp.lateral_offset), fwd);
        let second = hand_position(hit.point, hp.y_offset, self.hooking.pair(lead.other()).grab_offset(n, hp.lateral_offset), fwd);
        let change = change_state.then_some(ClimbState::FreeClimbing);
        self.hooking_point_swap(env, lead, first, second, hit.point, n, Parent::Climbable(hit.collider), None, change)
    }

    /// Shoulder position lowered to the current grab height.
    fn shoulder_at_grab(&self, env: &ClimbEnv) -> Vec3 {
        let hook = self.hooking.hooking_point(&env.frames(self.root));
        let s = self.shoulder();
        Vec3::new(s.x, hook.y, s.z)
    }

    /* ---- surface rays ---- */

    /// Sideways from the shoulder. Skipped while a traversal left the hands apart.
    pub(crate) fn free_left_right(&mut self, env: &ClimbEnv, change_state: bool) -> bool {
        if self.busy() || self.prev_dir != HorizontalDir::None { return false; }
        let m = env.input.move_axis.x;
        if m == 0.0 { return false; }
        let right = horizontal_dir(self.root.rot * Vec3::X);
        let dir = if m > 0.0 { right } else { -right };
        let origin = self.shoulder_at_grab(env);
        match self.find_hooking_point(env, origin, dir) {
            Some(hit) => self.free_climb(env, hit, change_state),
            None => false,
        }
    }

    /// Into the wall, from just behind the grab shifted along the input.
    pub(crate) fn free_forward(&mut self, env: &ClimbEnv, change_state: bool) -> bool {
        if self.busy() { return false; }
        let fwd = horizontal_dir(self.root.rot * Vec3::Z);
        let hook = self.hooking.hooking_point(&env.frames(self.root));
        let origin = hook - fwd * FORWARD_BACKOFF + self.climb_dir(&env.input);
        match self.find_hooking_point(env, origin, fwd) {
            Some(hit) => self.free_climb(env, hit, change_state),
            None => false,
        }
    }

    /// Back across an outside corner toward the current grab.
    pub(crate) fn free_edges(&mut self, env: &ClimbEnv, change_state: bool) -> bool {
        if self.busy() { return false; }
        let m = env.input.move_axis.x;
        if m == 0.0 { return false; }
        let fwd = horizontal_dir(self.root.rot * Vec3::Z);
        let right = horizontal_dir(self.root.rot * Vec3::X);
        let th = self.cfg.climb.edge_swap_threshold_y;
        let origin = self.hooking.hooking_point(&env.frames(self.root)) + fwd * EDGE_RAY_FORWARD;
        let (start, dir) = if m > 0.0 { (origin + right * th, -right) } else { (origin - right * th, right) };
        match self.find_hooking_point(env, start, dir) {
            Some(hit) => self.free_climb(env, hit, change_state),
            None => false,
        }
    }

    /// Surfaces behind the climber, for vertical input only.
    pub(crate) fn free_behind(&mut self, env: &ClimbEnv, change_state: bool) -> bool {
        if self.busy() || env.input.move_axis.y == 0.0 { return false; }
        let back = -horizontal_dir(self.root.rot * Vec3::Z);
        let origin = self.shoulder_at_grab(env) + self.climb_dir(&env.input);
        match self.find_hooking_point(env, origin, back) {
            Some(hit) => self.free_climb(env, hit, change_state),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ClimbConfig;
    use glam::Vec2;
    use riftclimb_core::types::Isometry;

    fn input(x: f32, y: f32) -> ClimbInput { ClimbInput { move_axis: Vec2::new(x, y), ..Default::default() } }

    #[test] fn vertical_moves_alternate_lead() {
        let mut m = ClimbMachine::new(ClimbConfig::default(), Isometry::default());
        assert_eq!(m.lead_for(&input(0.0, 1.0)), Side::Right);
        assert_eq!(m.lead_for(&input(0.0, 1.0)), Side::Left);
        assert_eq!(m.lead_for(&input(-1.0, 0.0)), Side::Left);
        assert_eq!(m.lead_for(&input(0.0, -1.0)), Side::Right);
    }

    #[test] fn climb_dir_follows_root_yaw() {
        let m = ClimbMachine::new(ClimbConfig::default(), Isometry::default());
        let th = m.config().climb.edge_swap_threshold_y;
        assert!((m.climb_dir(&input(1.0, 0.0)) - Vec3::X * th).length() < 1e-6);
        assert!((m.climb_dir(&input(0.0, -1.0)) + Vec3::Y * th).length() < 1e-6);
        assert_eq!(m.climb_dir(&input(0.0, 0.0)), Vec3::ZERO);
    }
}
