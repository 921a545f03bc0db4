use riftclimb_core::types::{Transform, Vec3};

#[derive(Copy, Clone, Debug, Default)]
pub struct Aabb { pub min: Vec3, pub max: Vec3 }

impl Aabb {
    #[inline] pub fn new(min: Vec3, max: Vec3) -> Self { Self { min, max } }
    pub fn from_points<I: IntoIterator<Item = Vec3>>(pts: I) -> Option<Self> {
        let mut it = pts.into_iter();
        let first = it.next()?;
        let mut b = Self::new(first, first);
        for p in it { b.min = b.min.min(p); b.max = b.max.max(p); }
        Some(b)
    }
    /// Touching boxes overlap.
    #[inline] pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
    #[inline] pub fn overlaps_sphere(&self, c: Vec3, r: f32) -> bool {
        c.clamp(self.min, self.max).distance_squared(c) <= r * r
    }
    /// World bounds of this local box under `xf` (all eight corners).
    pub fn transformed(&self, xf: &Transform) -> Aabb {
        let (lo, hi) = (self.min, self.max);
        let corners = (0..8).map(|i| {
            xf.transform_point(Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            ))
        });
        Aabb::from_points(corners).unwrap_or_default()
    }
}
