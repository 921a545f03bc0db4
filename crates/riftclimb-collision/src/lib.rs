pub mod query;
pub mod tri;
pub mod scene;

pub use query::{CollisionQuery, RayHit, SceneObject, Tag};
pub use scene::{Collider, Scene};
