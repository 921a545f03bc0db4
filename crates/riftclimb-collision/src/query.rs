use riftclimb_core::{types::{Transform, Vec3}, ClimbableId};
use riftclimb_geom::MeshAsset;
use serde::{Deserialize, Serialize};

/// Surface classification of a scene object.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Untagged,
    /// Rigid geometry whose mesh edges may be grabbed.
    Climbable,
    /// Surfaces grabbable anywhere via raycast.
    FreeClimbable,
}

#[derive(Copy, Clone, Debug)]
pub struct RayHit {
    pub point: Vec3,
    /// Geometric normal facing the ray origin.
    pub normal: Vec3,
    pub distance: f32,
    pub tag: Tag,
    pub collider: ClimbableId,
}

/// A placed object as seen by the edge tracker.
#[derive(Copy, Clone, Debug)]
pub struct SceneObject<'a> {
    pub tag: Tag,
    pub transform: Transform,
    pub mesh: &'a MeshAsset,
}

/// Ray and overlap queries consumed by the tracker, pose solver and climb states.
/// `dir` need not be normalized; `max` is a world-space length.
pub trait CollisionQuery {
    fn raycast(&self, origin: Vec3, dir: Vec3, max: f32) -> Option<RayHit>;
    /// All hits along the ray, nearest first.
    fn raycast_all(&self, origin: Vec3, dir: Vec3, max: f32) -> Vec<RayHit>;
    fn check_sphere(&self, c: Vec3, r: f32) -> bool;
    fn check_capsule(&self, a: Vec3, b: Vec3, r: f32) -> bool;
    /// Objects touched by the sphere, in ascending id order.
    fn overlap_sphere(&self, c: Vec3, r: f32) -> Vec<ClimbableId>;
    /// Looks an object up whether or not it is active.
    fn object(&self, id: ClimbableId) -> Option<SceneObject<'_>>;
    /// Every object tagged `Climbable` or `FreeClimbable`, in ascending id order.
    fn climbables(&self) -> Vec<ClimbableId>;
}
