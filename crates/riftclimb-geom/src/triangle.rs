use riftclimb_core::types::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Average of the three vertex normals.
    pub normal: Vec3,
}

impl Triangle {
    #[inline] pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self { Self { v0, v1, v2, normal } }
    #[inline] pub fn center(&self) -> Vec3 { (self.v0 + self.v1 + self.v2) / 3.0 }
    /// Unnormalized winding normal.
    #[inline] pub fn cross(&self) -> Vec3 { (self.v1 - self.v0).cross(self.v2 - self.v0) }
}

// order-sensitive; the normal is derived data
impl PartialEq for Triangle {
    fn eq(&self, o: &Self) -> bool { self.v0 == o.v0 && self.v1 == o.v1 && self.v2 == o.v2 }
}

/// The (at most two) triangles adjoining one edge. Once filled further adds are ignored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrianglePair {
    pub t0: Triangle,
    pub t1: Option<Triangle>,
}

impl TrianglePair {
    #[inline] pub fn new(t0: Triangle) -> Self { Self { t0, t1: None } }
    #[inline] pub fn filled(&self) -> bool { self.t1.is_some() }
    pub fn add(&mut self, t: Triangle) { if self.t1.is_none() { self.t1 = Some(t); } }
    #[inline] pub fn both(&self) -> Option<(&Triangle, &Triangle)> { self.t1.as_ref().map(|t1| (&self.t0, t1)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn third_add_ignored() {
        let t = |z: f32| Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 1.0, z), Vec3::Z);
        let mut p = TrianglePair::new(t(0.0));
        p.add(t(1.0));
        p.add(t(2.0));
        assert_eq!(p.t1, Some(t(1.0)));
    }
    #[test] fn equality_is_order_sensitive() {
        let a = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z);
        let b = Triangle::new(Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::Z);
        assert_ne!(a, b);
    }
}
