use riftclimb_core::types::Vec3;

/// Closest point on segment `[a, b]` to `p`, clamped to the endpoints.
#[inline]
pub fn closest_point_on_segment(a: Vec3, b: Vec3, p: Vec3) -> Vec3 {
    let ab = b - a;
    let t = (p - a).dot(ab);
    if t <= 0.0 { return a; }
    let denom = ab.dot(ab);
    if t >= denom { return b; }
    a + ab * (t / denom)
}
