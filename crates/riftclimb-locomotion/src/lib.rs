//! Climb state machine: hooking, edge and free climbing, and topping out.
pub mod settings;
pub mod input;
pub mod state;
pub mod guard;
pub mod machine;
mod hook;
mod swap;
mod free;
mod top;

pub use settings::{ClimbConfig, ClimbSettings, HookSettings, WallTopSettings};
pub use input::{ClimbEnv, ClimbInput, ExternalMode};
pub use state::{ClimbState, GrabOrigin, StateKind};
pub use guard::{HorizontalDir, Motion, MotionGuard};
pub use machine::{ClimbMachine, WallBlend};
