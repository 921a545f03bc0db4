use crate::types::Vec3;

/// Deterministic generator for test point sets and scripted jitter.
#[derive(Copy, Clone, Debug)]
pub struct XorShift64 { state: u64 }

impl XorShift64 {
    pub fn new(seed: u64) -> Self { Self { state: seed | 1 } }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12; x ^= x << 25; x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(2685821657736338717)
    }

    /// Uniform in [lo, hi).
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        let u = (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32;
        lo + (hi - lo) * u
    }

    /// Point inside the cube [-half, half)^3.
    pub fn next_point(&mut self, half: f32) -> Vec3 {
        Vec3::new(self.next_range(-half, half), self.next_range(-half, half), self.next_range(-half, half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn same_seed_same_points() {
        let (mut a, mut b) = (XorShift64::new(7), XorShift64::new(7));
        for _ in 0..64 {
            let p = a.next_point(2.0);
            assert_eq!(p, b.next_point(2.0));
            assert!(p.abs().max_element() <= 2.0);
        }
    }
}
