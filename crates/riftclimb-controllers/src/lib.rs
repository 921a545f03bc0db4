pub mod settings;
pub mod helpers;
pub mod tween;
pub mod frames;
pub mod effector;
pub mod hooking;
pub mod body;

pub use settings::{HandPlacement, BodySettings, RigConfig};
pub use helpers::Side;
pub use tween::{Ease, Tween, RotationTween};
pub use frames::{Parent, Target, Frames};
pub use effector::EffectorPair;
pub use hooking::HookingData;
pub use body::{BodySolver, Calibration, WallContact};
