//! Grab changes: edge swaps, the shared two-phase hook point swap, and traversal
//! along the held edge.
use riftclimb_controllers::{
    helpers::{hand_position, is_left, is_right, ordered_vertices, raycast_obstacle, set_vector_distance, Side},
    Frames, Parent, Target, Tween,
};
use riftclimb_core::{
    math::{horizontal_dir, horizontal_distance, look_rotation, midpoint, yaw_only},
    types::Vec3,
};
use riftclimb_edges::{EdgeData, EdgeHandle};
use tracing::debug;

use crate::guard::{HorizontalDir, Lerp3, Motion, SwapMotion, SwapPhase, TraversalMotion, MOTION_EASE};
use crate::input::ClimbEnv;
use crate::machine::ClimbMachine;
use crate::state::ClimbState;

impl ClimbMachine {
    /* ---- edge swap ---- */

    /// Swap onto an adjacent tracked edge in the input direction.
    pub(crate) fn edge_swap(&mut self, env: &ClimbEnv, change_state: bool) -> bool {
        if self.busy() { return false; }
        let th = self.cfg.climb.edge_swap_threshold_y;
        let m = env.input.move_axis;
        let found = if m.x < 0.0 {
            self.nearest_edge(env, Some(Side::Left), th, -th, false)
        } else if m.x > 0.0 {
            self.nearest_edge(env, Some(Side::Right), th, -th, false)
        } else if m.y > 0.0 {
            self.nearest_edge(env, None, th, 0.0, true)
        } else if m.y < 0.0 {
            self.nearest_edge(env, None, 0.0, -th, true)
        } else {
            None
        };
        match found {
            Some(h) => self.swap_to_edge(env, h, change_state),
            None => false,
        }
    }

    /// First tracked edge (nearest first) inside the vertical band and reach, in view
    /// from shoulder and hand height, on the requested side. A vertical swap whose
    /// closest point lands exactly on an endpoint ends the search.
    pub(crate) fn nearest_edge(&self, env: &ClimbEnv, side: Option<Side>, max: f32, min: f32, vertical: bool) -> Option<EdgeHandle> {
        let f = env.frames(self.root);
        let mid = self.hooking.hand_mid(&f);
        let hook = self.hooking.hooking_point(&f);
        let shoulder = self.shoulder();
        let shoulder_low = Vec3::new(shoulder.x, mid.y, shoulder.z);
        let fwd = self.root.rot * Vec3::Z;
        let held = self.hooking.edge();

        for (h, e) in env.tracker.iter() {
            if Some(h) == held { continue; }
            let cp = e.closest_point;
            let dy = cp.y - hook.y;
            if !(dy < max && dy > min && horizontal_distance(mid, cp) < self.cfg.climb.edge_swap_threshold_xz) { continue; }
            if raycast_obstacle(env.scene, shoulder, cp) || raycast_obstacle(env.scene, shoulder_low, cp) { continue; }
            match side {
                Some(Side::Left) if !is_left(self.root.pos, fwd, cp) => continue,
                Some(Side::Right) if !is_right(self.root.pos, fwd, cp) => continue,
                _ => {}
            }
            if vertical && (cp == e.edge[0] || cp == e.edge[1]) { return None; }
            return Some(h);
        }
        None
    }

    fn swap_to_edge(&mut self, env: &ClimbEnv, h: EdgeHandle, change_state: bool) -> bool {
        let Some(e) = env.tracker.get(h).copied() else { return false };
        let n = horizontal_dir(e.normal);
        let (left, right) = ordered_vertices(e.edge, midpoint(e.edge[0], e.edge[1]) - n, -n);
        let fwd = self.root.rot * Vec3::Z;
        let change = change_state.then_some(ClimbState::EdgeClimbing);
        if is_left(self.root.pos, fwd, e.closest_point) {
            self.swap_onto(env, Side::Left, left, right, h, &e, change)
        } else {
            self.swap_onto(env, Side::Right, right, left, h, &e, change)
        }
    }

    /// Hands straddle a point on the edge kept at least one lateral offset from
    /// either vertex.
    #[allow(clippy::too_many_arguments)]
    fn swap_onto(&mut self, env: &ClimbEnv, first: Side, first_vertex: Vec3, target_vertex: Vec3, h: EdgeHandle, e: &EdgeData, change: Option<ClimbState>) -> bool {
        let hp = self.cfg.hand;
        let lat = hp.lateral_offset;
        let len = first_vertex.distance(target_vertex);
        let dist = e.closest_point.distance(target_vertex);
        let dist = if len < 2.0 * lat.abs() { len * 0.5 } else { dist.clamp(lat, len - lat.abs()) };

        let n = horizontal_dir(e.normal);
        let dir = (target_vertex - first_vertex).normalize_or_zero() * lat;
        let point = target_vertex + (first_vertex - target_vertex).normalize_or_zero() * dist;
        let fwd = n * -hp.forward_position;
        let first_hand = hand_position(point, hp.y_offset, -dir, fwd);
        let second_hand = hand_position(point, hp.y_offset, dir, fwd);
        self.hooking_point_swap(env, first, first_hand, second_hand, point, n, Parent::Climbable(e.climbable), Some(h), change)
    }

    /* ---- hook point swap ---- */

    /// Validates the new pose, optionally switches state, then moves the leading pair
    /// followed by the trailing pair onto the new grab.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn hooking_point_swap(
        &mut self,
        env: &ClimbEnv,
        first: Side,
        first_hand: Vec3,
        second_hand: Vec3,
        point: Vec3,
        normal: Vec3,
        parent: Parent,
        next_edge: Option<EdgeHandle>,
        change: Option<ClimbState>,
    ) -> bool {
        if self.busy() { return false; }
        let (left, right) = match first { Side::Left => (first_hand, second_hand), Side::Right => (second_hand, first_hand) };
        let Some(contact) = self.body.check_next_position(env.scene, left, right, normal) else {
            debug!(?first, "swap blocked by obstruction");
            return false;
        };
        if let Some(next) = change {
            if !self.change_state(next, env) { return false; }
        }

        let lerp_time = self.cfg.climb.effector_lerp_time;
        let f = env.frames(self.root);
        let foot_angle = self.set_hanging_blend(contact.angle, contact.support, lerp_time * 2.0, &f);
        let mid = midpoint(first_hand, second_hand);
        let rot = look_rotation(-normal);
        let first_foot = self.body.foot_position(self.hooking.pair(first), first_hand, mid, rot, foot_angle);
        let second_foot = self.body.foot_position(self.hooking.pair(first.other()), second_hand, mid, rot, foot_angle);
        let (first_rot, second_rot) = (self.hand_rotation(normal, first), self.hand_rotation(normal, first.other()));
        let frame = f.frame(parent);

        self.hooking.update_hooking_point(point, normal, parent, &f);
        let lead = self.hooking.pair_mut(first);
        lead.hook(parent, &f);
        let from = lead.hand.world_rot(&f);
        lead.begin_rotation(from, first_rot, lerp_time);
        let motion = SwapMotion {
            first,
            phase: SwapPhase::First,
            tween: Tween::new(lerp_time, MOTION_EASE),
            hand: Lerp3::new(lead.hand.pos, frame.inverse_transform_point(first_hand)),
            foot: Lerp3::new(lead.foot.pos, frame.inverse_transform_point(first_foot)),
            second_hand: frame.inverse_transform_point(second_hand),
            second_foot: frame.inverse_transform_point(second_foot),
            second_rot,
            parent,
            next_edge,
        };
        debug!(?first, ?next_edge, "hook point swap");
        self.guard.begin(Motion::Swap(motion))
    }

    /* ---- traversal ---- */

    pub(crate) fn edge_traversal(&mut self, env: &ClimbEnv) -> bool {
        if self.busy() { return false; }
        let Some(e) = self.hooking.current_edge(env.tracker).copied() else { return false };
        let (lv, rv) = ordered_vertices(e.edge, env.tracker.center(), self.root.rot * Vec3::Z);
        let lat = self.cfg.hand.lateral_offset;
        let f = env.frames(self.root);
        let (lh, rh) = (self.hooking.hand_pos(Side::Left, &f), self.hooking.hand_pos(Side::Right, &f));
        let m = env.input.move_axis;

        let (side, vertex) = if m.x < 0.0 {
            (Side::Left, lv)
        } else if m.x > 0.0 {
            (Side::Right, rv)
        } else {
            return false;
        };
        if self.prev_dir == HorizontalDir::None {
            let Some(dir) = self.next_grab_dir(vertex, lat, &f) else { return false };
            let then = match side { Side::Left => HorizontalDir::Left, Side::Right => HorizontalDir::Right };
            self.traversal(env, side, dir, then)
        } else {
            // bring the trailing hand back next to the one that reached out
            let (anchor, mover) = match side { Side::Left => (lh, rh), Side::Right => (rh, lh) };
            self.traversal(env, side.other(), set_vector_distance(anchor, mover, lat * 2.0), HorizontalDir::None)
        }
    }

    /// Reach toward `vertex`, capped by the traversal radius and stopping a lateral
    /// offset short of the vertex. `None` when the hand is already there.
    fn next_grab_dir(&self, vertex: Vec3, lat: f32, f: &Frames) -> Option<Vec3> {
        let hp = self.cfg.hand;
        let radius = self.cfg.climb.hand_traversal_radius;
        let mid = self.hooking.hand_mid(f);
        let target = vertex - Vec3::new(0.0, hp.y_offset, 0.0) + self.root.rot * Vec3::Z * hp.forward_position;
        let reach = (target - mid).normalize_or_zero() * radius;
        let short = (mid - target).normalize_or_zero() * lat;
        let edge_distance = (target + short).distance(mid);
        let dir = if edge_distance > radius { reach } else { target + short - mid };
        (edge_distance > lat.abs()).then_some(dir)
    }

    fn traversal(&mut self, env: &ClimbEnv, first: Side, dir: Vec3, then: HorizontalDir) -> bool {
        if self.busy() { return false; }
        let f = env.frames(self.root);
        let first_hand = self.hooking.hand_pos(first, &f) + dir;
        let second_hand = self.hooking.hand_pos(first.other(), &f);
        let (left, right) = match first { Side::Left => (first_hand, second_hand), Side::Right => (second_hand, first_hand) };
        let Some(contact) = self.body.check_next_position(env.scene, left, right, self.hooking.normal) else {
            debug!(?first, "traversal blocked by obstruction");
            return false;
        };

        let lerp_time = self.cfg.climb.effector_lerp_time;
        let mid = midpoint(first_hand, second_hand);
        let rot = yaw_only(self.root.rot);
        let foot_angle = self.set_hanging_blend(contact.angle, contact.support, lerp_time, &f);
        let first_foot = self.body.foot_position(self.hooking.pair(first), first_hand, mid, rot, foot_angle);
        let second_foot = self.body.foot_position(self.hooking.pair(first.other()), second_hand, mid, rot, foot_angle);
        let (lf, rf) = match first { Side::Left => (first_foot, second_foot), Side::Right => (second_foot, first_foot) };

        let local = |t: &Target, to: Vec3| Lerp3::new(t.pos, f.frame(t.parent).inverse_transform_point(to));
        let motion = TraversalMotion {
            side: first,
            tween: Tween::new(lerp_time, MOTION_EASE),
            hand: local(&self.hooking.pair(first).hand, first_hand),
            feet: [local(&self.hooking.left.foot, lf), local(&self.hooking.right.foot, rf)],
            then,
        };
        debug!(?first, ?then, "edge traversal");
        self.guard.begin(Motion::Traversal(motion))
    }
}
