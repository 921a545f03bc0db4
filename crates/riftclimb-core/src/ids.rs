use core::fmt;
use serde::{Deserialize, Serialize};

/// Scene object that can own edges, grab points and attached effectors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClimbableId(pub u32);
impl fmt::Display for ClimbableId { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ClimbableId({})", self.0) } }

/// Shared mesh asset; several climbables may point at the same one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u32);
impl fmt::Display for MeshId { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "MeshId({})", self.0) } }
