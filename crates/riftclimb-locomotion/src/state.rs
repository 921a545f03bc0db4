//! Climb states and the transitions allowed between them.
use riftclimb_core::{types::Vec3, ClimbableId};
use riftclimb_edges::EdgeHandle;

/// Where a grab came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GrabOrigin {
    Edge(EdgeHandle),
    Free { point: Vec3, normal: Vec3, collider: ClimbableId },
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ClimbState {
    /// External locomotion owns the agent.
    #[default]
    Detached,
    Hooking { origin: GrabOrigin, first_iteration: bool, hanging: bool },
    EdgeClimbing,
    FreeClimbing,
    /// Hands over the top of a wall; root motion comes from the animation driver.
    ClimbToTop,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StateKind { Detached, Hooking, EdgeClimbing, FreeClimbing, ClimbToTop }

impl ClimbState {
    pub fn kind(&self) -> StateKind {
        match self {
            ClimbState::Detached => StateKind::Detached,
            ClimbState::Hooking { .. } => StateKind::Hooking,
            ClimbState::EdgeClimbing => StateKind::EdgeClimbing,
            ClimbState::FreeClimbing => StateKind::FreeClimbing,
            ClimbState::ClimbToTop => StateKind::ClimbToTop,
        }
    }
}

impl StateKind {
    #[inline] pub fn climbing(self) -> bool { matches!(self, StateKind::EdgeClimbing | StateKind::FreeClimbing) }
    /// Hands attached to a climbable.
    #[inline] pub fn hooked(self) -> bool { matches!(self, StateKind::Hooking | StateKind::EdgeClimbing | StateKind::FreeClimbing) }

    /// Seconds until the state leaves on its own.
    pub fn exit_time(self, hook: f32, top: f32) -> Option<f32> {
        match self {
            StateKind::Hooking => Some(hook),
            StateKind::ClimbToTop => Some(top),
            _ => None,
        }
    }
}

/// Transition table.
pub fn allowed(from: StateKind, to: StateKind) -> bool {
    use StateKind::*;
    matches!(
        (from, to),
        (Detached, Hooking)
            | (Hooking, EdgeClimbing)
            | (Hooking, FreeClimbing)
            | (EdgeClimbing, FreeClimbing)
            | (FreeClimbing, EdgeClimbing)
            | (EdgeClimbing | FreeClimbing, ClimbToTop)
            | (EdgeClimbing | FreeClimbing, Detached)
            | (ClimbToTop, Detached)
    )
}
