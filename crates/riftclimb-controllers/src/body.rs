//! Root pose from the two hand targets, plus the wall-angle rays under the hands.
//!
//! The solve runs in four steps: base position, yaw correction, arm compensation and
//! overhang pitch. Foot targets are derived separately on demand.
use glam::Quat;
use riftclimb_collision::CollisionQuery;
use riftclimb_core::{
    math::{angle_deg, horizontal, horizontal_dir, horizontal_distance, look_rotation, midpoint, yaw_only},
    types::{Isometry, Vec3},
    iso,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::effector::EffectorPair;
use crate::helpers::{move_around_pivot, move_around_pivot_delta, rotate_around_pivot};
use crate::settings::BodySettings;

/// Captured once when a grab starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Root minus hand midpoint at hook time.
    pub hand_to_root: Vec3,
    pub horizontal_edge_dist: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WallContact {
    pub support: bool,
    /// Degrees; 0 is flush, negative is an overhang.
    pub angle: f32,
}

/* ---- capsule used to validate a pose before committing a move ---- */
const CAPSULE_RADIUS: f32 = 0.15;
const SUPPORTED_CAPSULE: [(f32, f32); 2] = [(0.4, -0.15), (0.7, -0.15)];
const HANGING_CAPSULE: [(f32, f32); 2] = [(0.2, 0.05), (0.5, 0.05)];

#[derive(Clone, Debug)]
pub struct BodySolver {
    pub settings: BodySettings,
    pub lateral_offset: f32,
    /// Shoulder center in root space.
    pub arm_center: Vec3,
    calib: Option<Calibration>,
}

impl BodySolver {
    pub fn new(settings: BodySettings, lateral_offset: f32, arm_center: Vec3) -> Self {
        Self { settings, lateral_offset, arm_center, calib: None }
    }

    pub fn calibrate(&mut self, c: Calibration) { self.calib = Some(c); }
    pub fn reset(&mut self) { self.calib = None; }
    #[inline] pub fn is_calibrated(&self) -> bool { self.calib.is_some() }

    fn calibration(&self) -> Calibration {
        self.calib.unwrap_or_else(|| {
            error!("body solver used before hook calibration");
            Calibration::default()
        })
    }

    /// Root below and behind the hand midpoint; spreading the hands raises it.
    pub fn base_position(&self, left: Vec3, right: Vec3, rot: Quat) -> Vec3 {
        let c = self.calibration();
        let mid = midpoint(left, right);
        let spread = horizontal_distance(left, right) - self.lateral_offset * 2.0;
        let lift = if spread < 0.01 { 0.0 } else { spread } * self.settings.root_movement_height;
        let higher = left.y.max(right.y);
        let h = -(rot * Vec3::Z) * c.horizontal_edge_dist + mid;
        Vec3::new(h.x, c.hand_to_root.y + higher + lift, h.z)
    }

    /// Strips pitch and roll, then turns the root about the hand midpoint until
    /// it faces the grip line square on.
    pub fn yaw_correction(&self, left: Vec3, right: Vec3, rot: &mut Quat, pos: &mut Vec3) {
        let c = self.calibration();
        *rot = yaw_only(*rot);
        let mid = midpoint(left, right);
        let h = -(*rot * Vec3::Z) * c.horizontal_edge_dist + mid;
        let angle = angle_deg(left - right, mid - h);
        *pos += rotate_around_pivot(*pos, mid, Vec3::Y, 90.0 - angle, rot);
    }

    pub fn arm_compensation(&self, left: Vec3, right: Vec3, wall_angle: f32, rot: Quat, pos: &mut Vec3) {
        let arm = *pos + rot * self.arm_center;
        let axis = (left - right).normalize_or_zero();
        *pos += move_around_pivot_delta(arm, midpoint(left, right), axis, wall_angle * self.settings.arm_angle_scaling);
    }

    /// Tilts the torso out from an overhang. No-op unless `wall_angle < 0`.
    pub fn pitch(&self, wall_angle: f32, rot: &mut Quat, pos: &mut Vec3) {
        if !(wall_angle < 0.0) { return; }
        if self.arm_center == Vec3::ZERO {
            error!("body solver pitch without an arm center");
        }
        let arm = *pos + *rot * self.arm_center;
        let axis = *rot * Vec3::X;
        *pos += rotate_around_pivot(*pos, arm, axis, -wall_angle, rot);
    }

    pub fn solve(&self, left: Vec3, right: Vec3, rot: Quat, wall_angle: f32) -> Isometry {
        let mut rot = rot;
        let mut pos = self.base_position(left, right, rot);
        self.yaw_correction(left, right, &mut rot, &mut pos);
        self.arm_compensation(left, right, wall_angle, rot, &mut pos);
        self.pitch(wall_angle, &mut rot, &mut pos);
        iso(pos, rot)
    }

    pub fn foot_position(&self, pair: &EffectorPair, hand: Vec3, mid: Vec3, rot: Quat, wall_angle: f32) -> Vec3 {
        move_around_pivot(pair.foot_target(hand, rot), mid, rot * Vec3::X, -wall_angle)
    }

    /// Casts stacked rays toward the wall from below the hands, then one at hand height.
    pub fn wall_contact<Q: CollisionQuery + ?Sized>(&self, q: &Q, lower: Vec3, mid: Vec3, dir: Vec3) -> WallContact {
        let s = &self.settings;
        let fwd = horizontal_dir(dir);
        let back = fwd * s.raycast_back_distance;
        let low = Vec3::new(lower.x, mid.y - s.raycast_height, lower.z);
        for i in 0..s.lower_raycast_count {
            let up = Vec3::Y * (s.lower_raycast_spacing * i as f32);
            let Some(foot) = q.raycast(low - back + up, fwd, s.raycast_distance) else { continue };
            let Some(hand) = q.raycast(mid - back, fwd, s.raycast_distance) else { continue };
            let raw = angle_deg(fwd, hand.point - foot.point) - 90.0;
            let angle = if raw.abs() < s.flush_epsilon { 0.0 } else { raw };
            return WallContact { support: angle.abs() < s.support_threshold, angle };
        }
        WallContact::default()
    }

    /// Solves the pose the body would take with the given hands and tests it for
    /// overlap. `None` when the torso would intersect geometry.
    pub fn check_next_position<Q: CollisionQuery + ?Sized>(&self, q: &Q, left: Vec3, right: Vec3, normal: Vec3) -> Option<WallContact> {
        let mut rot = look_rotation(horizontal(-normal));
        let mid = midpoint(left, right);
        let mut pos = self.base_position(left, right, rot);
        let contact = self.wall_contact(q, pos, mid, rot * Vec3::Z);
        self.arm_compensation(left, right, contact.angle, rot, &mut pos);
        self.pitch(contact.angle, &mut rot, &mut pos);
        let offsets = if contact.support { SUPPORTED_CAPSULE } else { HANGING_CAPSULE };
        let [a, b] = offsets.map(|(up, fwd)| pos + rot * Vec3::new(0.0, up, fwd));
        (!q.check_capsule(a, b, CAPSULE_RADIUS)).then_some(contact)
    }
}
