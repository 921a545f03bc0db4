use blake3::Hasher;
use crate::types::Vec3;
use glam::Quat;

pub struct StepHasher(Hasher);

impl StepHasher {
    pub fn new() -> Self { StepHasher(Hasher::new()) }
    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

impl Default for StepHasher {
    fn default() -> Self { Self::new() }
}

// -0.0 and 0.0 compare equal, so they must hash equal too
#[inline]
fn canon(c: f32) -> f32 { c + 0.0 }

#[inline]
pub fn hash_vec3(h: &mut StepHasher, v: &Vec3) {
    for c in [v.x, v.y, v.z] { h.update_bytes(&canon(c).to_le_bytes()); }
}

#[inline]
pub fn hash_quat(h: &mut StepHasher, q: &Quat) {
    for c in [q.x, q.y, q.z, q.w] { h.update_bytes(&canon(c).to_le_bytes()); }
}

/// Stable 64-bit hash of a point (BLAKE3 → first 8 bytes little-endian).
pub fn point_hash(v: Vec3) -> u64 {
    let mut h = StepHasher::new();
    hash_vec3(&mut h, &v);
    let b = h.finalize();
    u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn signed_zero_hashes_equal() {
        assert_eq!(point_hash(Vec3::new(0.0, -0.0, 1.0)), point_hash(Vec3::new(-0.0, 0.0, 1.0)));
    }
    #[test] fn distinct_points_differ() {
        assert_ne!(point_hash(Vec3::Y), point_hash(-Vec3::Y));
    }
}
