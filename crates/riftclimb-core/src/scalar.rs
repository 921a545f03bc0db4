pub type Scalar = f32;

/// Below this length a direction is treated as degenerate.
pub const DIR_EPS: Scalar = 1.0e-6;
