//! Small vector helpers shared by the climbing crates. Angles are in degrees.
use glam::{EulerRot, Quat};
use crate::types::{Mat3, Vec3};
use crate::scalar::DIR_EPS;

#[inline] pub fn horizontal(v: Vec3) -> Vec3 { Vec3::new(v.x, 0.0, v.z) }
#[inline] pub fn horizontal_dir(v: Vec3) -> Vec3 { horizontal(v).normalize_or_zero() }
#[inline] pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 { horizontal(a - b).length() }
#[inline] pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 { (a + b) * 0.5 }

/// Unsigned angle between two vectors; 0 when either is degenerate.
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let d = (a.length_squared() * b.length_squared()).sqrt();
    if d < 1.0e-15 { return 0.0; }
    (a.dot(b) / d).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Rotation of `angle` degrees about `axis`; identity for a degenerate axis.
pub fn angle_axis(angle: f32, axis: Vec3) -> Quat {
    let a = axis.normalize_or_zero();
    if a == Vec3::ZERO { return Quat::IDENTITY; }
    Quat::from_axis_angle(a.into(), angle.to_radians())
}

/// Rotation whose +Z looks along `forward` with +Y kept as close to world up as possible.
pub fn look_rotation(forward: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO { return Quat::IDENTITY; }
    let mut r = Vec3::Y.cross(f);
    if r.length_squared() < DIR_EPS { r = Vec3::X; } else { r = r.normalize(); }
    let u = f.cross(r);
    Quat::from_mat3a(&Mat3::from_cols(r, u, f)).normalize()
}

/// Heading about +Y in degrees; 0 faces +Z.
pub fn yaw_deg(q: Quat) -> f32 {
    let f = q * Vec3::Z;
    if horizontal(f).length_squared() > DIR_EPS { return f.x.atan2(f.z).to_degrees(); }
    let r = q * Vec3::X;
    (-r.z).atan2(r.x).to_degrees()
}

/// Drops pitch and roll.
#[inline] pub fn yaw_only(q: Quat) -> Quat { Quat::from_rotation_y(yaw_deg(q).to_radians()) }

/// Euler offset in degrees, applied Z then X then Y.
#[inline]
pub fn euler_deg(e: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, e.y.to_radians(), e.x.to_radians(), e.z.to_radians())
}

/// Positive when `target` lies to the left of an observer at `origin` facing `forward`.
#[inline]
pub fn side_of(origin: Vec3, forward: Vec3, target: Vec3) -> f32 {
    (target - origin).normalize_or_zero().cross(forward).y
}

#[inline] pub fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }
