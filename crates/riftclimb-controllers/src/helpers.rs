//! Stateless climb geometry. Angles in degrees.
use glam::Quat;
use riftclimb_collision::CollisionQuery;
use riftclimb_core::{math::{angle_axis, side_of}, types::Vec3};
use serde::{Deserialize, Serialize};

/// Dead zone of the left/right test; targets inside it count for both sides.
pub const SIDE_EPS: f32 = 0.01;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side { Left, Right }

impl Side {
    #[inline] pub fn other(self) -> Side { match self { Side::Left => Side::Right, Side::Right => Side::Left } }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lateral { Left, Right, Both }

#[inline] pub fn is_left(origin: Vec3, forward: Vec3, p: Vec3) -> bool { side_of(origin, forward, p) >= -SIDE_EPS }
#[inline] pub fn is_right(origin: Vec3, forward: Vec3, p: Vec3) -> bool { side_of(origin, forward, p) <= SIDE_EPS }

pub fn classify(origin: Vec3, forward: Vec3, p: Vec3) -> Lateral {
    match (is_left(origin, forward, p), is_right(origin, forward, p)) {
        (true, true) => Lateral::Both,
        (true, false) => Lateral::Left,
        _ => Lateral::Right,
    }
}

/// Anything between `from` and 90 % of the way to `to`.
pub fn raycast_obstacle<Q: CollisionQuery + ?Sized>(q: &Q, from: Vec3, to: Vec3) -> bool {
    q.raycast(from, to - from, from.distance(to) * 0.9).is_some()
}

/// Offset that moves `origin` onto the far side of `target`, at `distance` from it.
#[inline]
pub fn set_vector_distance(target: Vec3, origin: Vec3, distance: f32) -> Vec3 {
    (target - origin) + (origin - target).normalize_or_zero() * distance
}

/// New position of `p` after turning `angle` about `axis` through `pivot`.
#[inline]
pub fn move_around_pivot(p: Vec3, pivot: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    angle_axis(angle, axis) * (p - pivot) + pivot
}

#[inline]
pub fn move_around_pivot_delta(p: Vec3, pivot: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    move_around_pivot(p, pivot, axis, angle) - p
}

/// Like [`move_around_pivot_delta`] but also accumulates the turn into `rot`.
pub fn rotate_around_pivot(p: Vec3, pivot: Vec3, axis: Vec3, angle: f32, rot: &mut Quat) -> Vec3 {
    let q = angle_axis(angle, axis);
    *rot = (q * *rot).normalize();
    q * (p - pivot) + pivot - p
}

/// Splits an edge into (left, right) endpoints as seen by an observer.
/// When both land on one side the nearer point is kept on the inner slot.
pub fn ordered_vertices(edge: [Vec3; 2], observer: Vec3, forward: Vec3) -> (Vec3, Vec3) {
    let (e0, e1) = (edge[0], edge[1]);
    let (c0, c1) = (side_of(observer, forward, e0), side_of(observer, forward, e1));
    let (mut left, mut right) = (e0, e1);
    if c0 < 0.0 {
        left = e1;
        right = e0;
        if c1 < 0.0 && observer.distance(left) > observer.distance(right) {
            left = e0;
            right = e1;
        }
    }
    if c0 > 0.0 && c1 > 0.0 && observer.distance(left) < observer.distance(right) {
        left = e1;
        right = e0;
    }
    (left, right)
}

/// Grab point lowered by `y_offset`, shifted sideways and along the wall normal.
#[inline]
pub fn hand_position(grab: Vec3, y_offset: f32, lateral: Vec3, forward: Vec3) -> Vec3 {
    grab - Vec3::new(0.0, y_offset, 0.0) + lateral + forward
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_core::vec3;

    #[test] fn left_right_scenario() {
        let (o, f) = (Vec3::ZERO, Vec3::Z);
        assert_eq!(classify(o, f, vec3(1.0, 0.0, 1.0)), Lateral::Right);
        assert_eq!(classify(o, f, vec3(-1.0, 0.0, 1.0)), Lateral::Left);
        assert_eq!(classify(o, f, vec3(0.0, 0.0, 1.0)), Lateral::Both);
        // inside the dead zone still counts for both
        assert_eq!(classify(o, f, vec3(0.005, 0.0, 1.0)), Lateral::Both);
    }

    #[test] fn pivot_accumulates_rotation() {
        let mut rot = Quat::IDENTITY;
        let p = vec3(1.0, 0.0, 0.0);
        let d = rotate_around_pivot(p, Vec3::ZERO, Vec3::Y, 90.0, &mut rot);
        assert!((p + d - vec3(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((rot * Vec3::X - vec3(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((move_around_pivot(vec3(2.0, 0.0, 0.0), Vec3::X, Vec3::Y, 180.0) - Vec3::ZERO).length() < 1e-5);
    }

    #[test] fn ordered_vertices_facing_wall() {
        // observer in front of a ledge facing +Z
        let edge = [vec3(0.5, 1.5, 0.5), vec3(-0.5, 1.5, 0.5)];
        let (l, r) = ordered_vertices(edge, vec3(0.0, 1.5, -0.5), Vec3::Z);
        assert_eq!(l, edge[1]);
        assert_eq!(r, edge[0]);
        let (l2, r2) = ordered_vertices([edge[1], edge[0]], vec3(0.0, 1.5, -0.5), Vec3::Z);
        assert_eq!((l2, r2), (l, r));
    }

    #[test] fn ordered_vertices_same_side_prefers_near() {
        let near = vec3(-0.5, 0.0, 1.0);
        let far = vec3(-2.0, 0.0, 1.0);
        let (l, r) = ordered_vertices([near, far], Vec3::ZERO, Vec3::Z);
        assert_eq!((l, r), (far, near));
    }

    #[test] fn vector_distance_regathers_hand() {
        let (left, right) = (vec3(-0.5, 0.0, 0.0), vec3(0.1, 0.0, 0.0));
        let moved = right + set_vector_distance(left, right, 0.2);
        assert!((moved - vec3(-0.3, 0.0, 0.0)).length() < 1e-6);
    }
}
