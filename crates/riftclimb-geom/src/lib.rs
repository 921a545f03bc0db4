pub mod aabb;
pub mod edge;
pub mod triangle;
pub mod segment;
pub mod mesh;

pub use aabb::Aabb;
pub use edge::Edge;
pub use triangle::{Triangle, TrianglePair};
pub use segment::closest_point_on_segment;
pub use mesh::{MeshAsset, MeshData, MeshError};
