//! Hook requests and the transient Hooking state.
use riftclimb_collision::{CollisionQuery, RayHit, Tag};
use riftclimb_controllers::{
    helpers::{hand_position, ordered_vertices, Side},
    Calibration, Frames, Parent,
};
use riftclimb_core::{
    math::{horizontal_dir, horizontal_distance, look_rotation, yaw_only},
    types::Vec3,
};
use riftclimb_edges::{EdgeData, EdgeHandle};
use tracing::{debug, error};

use crate::input::ClimbEnv;
use crate::machine::ClimbMachine;
use crate::state::{ClimbState, GrabOrigin};

/// How many of the nearest tracked edges a hook request looks at.
const HOOK_CANDIDATES: usize = 2;

impl ClimbMachine {
    fn within_hook_reach(&self, center: Vec3, p: Vec3) -> bool {
        let h = &self.cfg.hook;
        horizontal_distance(center, p) < h.hooking_distance_xz && (p.y - center.y).abs() < h.hooking_distance_y
    }

    pub(crate) fn find_edge_hook(&self, env: &ClimbEnv) -> Option<(EdgeHandle, EdgeData)> {
        let c = env.tracker.center();
        env.tracker
            .iter()
            .take(HOOK_CANDIDATES)
            .find(|(_, e)| self.within_hook_reach(c, e.closest_point))
            .map(|(h, e)| (h, *e))
    }

    pub(crate) fn find_free_hook(&self, env: &ClimbEnv) -> Option<RayHit> {
        let c = env.tracker.center();
        let reach = self.cfg.hook.hooking_distance_xz + self.cfg.hook.hooking_distance_y;
        let hit = env.scene.raycast(c, self.root.rot * Vec3::Z, reach)?;
        (hit.tag == Tag::FreeClimbable && self.within_hook_reach(c, hit.point)).then_some(hit)
    }

    /// Edge candidates win over free surfaces.
    pub(crate) fn request_hook(&mut self, env: &ClimbEnv) -> bool {
        let origin = if let Some((h, e)) = self.find_edge_hook(env) {
            self.root.rot = look_rotation(horizontal_dir(-e.normal));
            GrabOrigin::Edge(h)
        } else if let Some(hit) = self.find_free_hook(env) {
            self.root.rot = look_rotation(horizontal_dir(-hit.normal));
            GrabOrigin::Free { point: hit.point, normal: hit.normal, collider: hit.collider }
        } else {
            return false;
        };
        debug!(?origin, "hook requested");
        self.change_state(ClimbState::Hooking { origin, first_iteration: true, hanging: false }, env)
    }

    /// `false` when the grab target is gone; nothing has been touched in that case.
    pub(crate) fn enter_hooking(&mut self, origin: GrabOrigin, env: &ClimbEnv) -> bool {
        let (point, normal, parent, edge) = match origin {
            GrabOrigin::Edge(h) => match env.tracker.get(h) {
                Some(e) => (e.closest_point, e.normal, Parent::Climbable(e.climbable), Some((h, *e))),
                None => {
                    error!("hook target edge vanished before hooking");
                    return false;
                }
            },
            GrabOrigin::Free { point, normal, collider } => (point, normal, Parent::Climbable(collider), None),
        };

        self.hang = 1.0;
        let h = self.cfg.hook;
        let flat = point + horizontal_dir(normal) * h.wall_distance;
        self.root.pos = Vec3::new(flat.x, point.y - h.transform_height, flat.z);
        let f = env.frames(self.root);

        self.place_hands(point, normal, edge.map(|(_, e)| e), &f);
        let mid = self.hooking.hand_mid(&f);
        self.body.calibrate(Calibration {
            hand_to_root: self.root.pos - mid,
            horizontal_edge_dist: horizontal_distance(self.root.pos, mid),
        });

        self.hooking.update_hooking_point(point, normal, parent, &f);
        self.hooking.set_edge(edge.map(|(h, _)| h));
        let yaw_inv = yaw_only(self.root.rot).inverse();
        for side in [Side::Left, Side::Right] {
            let tip = self.root.transform_point(self.cfg.rig.foot_tip(side));
            let pair = self.hooking.pair_mut(side);
            pair.foot_dir = yaw_inv * (tip - pair.hand.world_pos(&f));
            pair.foot.set_world_pos(tip, &f);
            pair.hook(parent, &f).set_hand_weight(1.0);
        }
        true
    }

    fn place_hands(&mut self, point: Vec3, normal: Vec3, edge: Option<EdgeData>, f: &Frames) {
        let hp = self.cfg.hand;
        let (left, right) = match edge {
            Some(e) => {
                let n = horizontal_dir(e.normal);
                let cp = e.closest_point;
                let (lv, rv) = ordered_vertices(e.edge, cp - n, n);
                let fwd = -n * hp.forward_position;
                let lateral = |v: Vec3| (v - cp).normalize_or_zero() * hp.lateral_offset;
                (hand_position(cp, hp.y_offset, -lateral(lv), fwd), hand_position(cp, hp.y_offset, -lateral(rv), fwd))
            }
            None => {
                let n = horizontal_dir(normal);
                let fwd = -n * hp.forward_position;
                (
                    hand_position(point, hp.y_offset, self.hooking.left.grab_offset(n, hp.lateral_offset), fwd),
                    hand_position(point, hp.y_offset, self.hooking.right.grab_offset(n, hp.lateral_offset), fwd),
                )
            }
        };
        for (side, p) in [(Side::Left, left), (Side::Right, right)] {
            let rot = self.hand_rotation(normal, side);
            let hand = &mut self.hooking.pair_mut(side).hand;
            hand.set_world_pos(p, f);
            hand.set_world_rot(rot, f);
        }
    }

    pub(crate) fn update_hooking(&mut self, env: &ClimbEnv) {
        let ClimbState::Hooking { first_iteration, .. } = self.state else { return };
        let f = env.frames(self.root);
        let (l, r) = (self.hooking.hand_pos(Side::Left, &f), self.hooking.hand_pos(Side::Right, &f));
        let mid = self.hooking.hand_mid(&f);

        let contact = self.body.wall_contact(env.scene, self.root.pos, mid, self.root.rot * Vec3::Z);
        let (wall, arm, hanging) = if contact.support {
            let w = if self.cfg.hook.exit_time > 0.0 { self.time_in_state / self.cfg.hook.exit_time } else { 1.0 };
            for p in self.hooking.pairs_mut() { p.set_foot_weight(w); }
            (contact.angle, contact.angle, false)
        } else {
            self.hang = 0.0;
            (self.cfg.body.support_threshold, 0.0, true)
        };

        if first_iteration {
            let rot = self.root.rot;
            for (side, hand) in [(Side::Left, l), (Side::Right, r)] {
                let foot = self.body.foot_position(self.hooking.pair(side), hand, mid, rot, arm);
                self.hooking.pair_mut(side).foot.set_world_pos(foot, &f);
            }
        }

        self.wall.current = wall;
        self.solve_root(&f);
        if let ClimbState::Hooking { first_iteration, hanging: h, .. } = &mut self.state {
            *first_iteration = false;
            *h = hanging;
        }
    }
}
