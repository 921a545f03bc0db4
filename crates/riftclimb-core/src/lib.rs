pub mod scalar;
pub mod ids;
pub mod types;
pub mod math;
pub mod hash;
pub mod rng;
pub mod tick;

pub use scalar::Scalar;
pub use ids::{ClimbableId, MeshId};
pub use types::{Vec3, Isometry, Transform, vec3, iso};
pub use hash::{StepHasher, hash_vec3, hash_quat, point_hash};
pub use rng::XorShift64;
pub use tick::TickCtx;
pub use glam::Quat;
