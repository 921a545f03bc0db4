use core::hash::{Hash, Hasher};
use riftclimb_core::{point_hash, types::Vec3};

/// Unordered pair of points. Endpoints are stored in descending hash order so
/// `Edge::new(a, b) == Edge::new(b, a)`; when both hashes collide the stored
/// order is arbitrary and equality compares either order.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub v0: Vec3,
    pub v1: Vec3,
    h0: u64,
    h1: u64,
    same_hash: bool,
}

impl Edge {
    pub fn new(a: Vec3, b: Vec3) -> Self { Self::with_hashes(a, point_hash(a), b, point_hash(b)) }

    /// Builds an edge from precomputed point hashes.
    pub fn with_hashes(a: Vec3, ha: u64, b: Vec3, hb: u64) -> Self {
        if ha > hb { Self { v0: a, v1: b, h0: ha, h1: hb, same_hash: false } }
        else if ha == hb { Self { v0: a, v1: b, h0: ha, h1: hb, same_hash: true } }
        else { Self { v0: b, v1: a, h0: hb, h1: ha, same_hash: false } }
    }

    #[inline] pub fn same_hash(&self) -> bool { self.same_hash }
    #[inline] pub fn vertices(&self) -> [Vec3; 2] { [self.v0, self.v1] }
    #[inline] pub fn length(&self) -> f32 { self.v0.distance(self.v1) }
    #[inline] pub fn midpoint(&self) -> Vec3 { (self.v0 + self.v1) * 0.5 }
    #[inline] pub fn direction(&self) -> Vec3 { self.v1 - self.v0 }
}

impl PartialEq for Edge {
    fn eq(&self, o: &Self) -> bool {
        let ordered = self.v0 == o.v0 && self.v1 == o.v1;
        if self.same_hash || o.same_hash { ordered || (self.v0 == o.v1 && self.v1 == o.v0) } else { ordered }
    }
}
impl Eq for Edge {}

impl Hash for Edge {
    // colliding edges store (h, h) in either order, so this stays consistent with Eq
    fn hash<H: Hasher>(&self, state: &mut H) { self.h0.hash(state); self.h1.hash(state); }
}
