use glam::{Vec3A, Mat3A, Quat};
use serde::{Deserialize, Serialize};
use crate::Scalar;

pub type Vec3 = Vec3A;
pub type Mat3 = Mat3A;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }

/// Rigid pose: position + rotation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Isometry {
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.rot * p + self.pos }
    #[inline] pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 { self.rot.inverse() * (p - self.pos) }
    #[inline] pub fn compose(&self, local: &Isometry) -> Isometry {
        Isometry { pos: self.transform_point(local.pos), rot: (self.rot * local.rot).normalize() }
    }
    #[inline] pub fn relative(&self, world: &Isometry) -> Isometry {
        Isometry { pos: self.inverse_transform_point(world.pos), rot: (self.rot.inverse() * world.rot).normalize() }
    }
}

/// Scene-object transform. Scale is per-axis and applied before rotation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform { pub pos: Vec3, pub rot: Quat, pub scale: Vec3 }

impl Default for Transform {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY, scale: Vec3::ONE } }
}

impl Transform {
    #[inline] pub fn from_iso(i: Isometry) -> Self { Self { pos: i.pos, rot: i.rot, scale: Vec3::ONE } }
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.rot * (self.scale * p) + self.pos }
    #[inline] pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 { inv_scale(self.scale) * (self.rot.inverse() * (p - self.pos)) }
    #[inline] pub fn transform_vector(&self, v: Vec3) -> Vec3 { self.rot * (self.scale * v) }
    /// Unit world normal; uses the inverse scale so it stays perpendicular to scaled faces.
    #[inline] pub fn transform_normal(&self, n: Vec3) -> Vec3 { (self.rot * (inv_scale(self.scale) * n)).normalize_or_zero() }
}

#[inline]
fn inv_scale(s: Vec3) -> Vec3 {
    let r = |c: f32| if c.abs() > 1.0e-12 { 1.0 / c } else { 0.0 };
    Vec3::new(r(s.x), r(s.y), r(s.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn transform_roundtrip_with_scale() {
        let t = Transform { pos: vec3(1.0, 2.0, 3.0), rot: Quat::from_rotation_y(0.7), scale: vec3(2.0, 1.0, 0.5) };
        let p = vec3(0.3, -0.4, 1.1);
        assert!((t.inverse_transform_point(t.transform_point(p)) - p).length() < 1e-5);
    }
    #[test] fn normal_stays_perpendicular_under_scale() {
        let t = Transform { pos: Vec3::ZERO, rot: Quat::from_rotation_y(0.7), scale: vec3(2.0, 1.0, 0.5) };
        // a slanted face spanned by these two vectors
        let (a, b) = (vec3(1.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0));
        let n = t.transform_normal(a.cross(b));
        assert!(n.dot(t.transform_vector(a)).abs() < 1e-5);
        assert!(n.dot(t.transform_vector(b)).abs() < 1e-5);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
    #[test] fn iso_relative_inverts_compose() {
        let a = iso(vec3(0.0, 1.0, 0.0), Quat::from_rotation_x(0.3));
        let l = iso(vec3(0.5, 0.0, 0.2), Quat::from_rotation_z(-0.2));
        let w = a.compose(&l);
        let back = a.relative(&w);
        assert!((back.pos - l.pos).length() < 1e-5);
        assert!(back.rot.angle_between(l.rot) < 1e-4);
    }
}
