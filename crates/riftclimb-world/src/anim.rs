use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// Animation parameters pushed once per step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimParams {
    pub climbing: bool,
    pub wall_run: bool,
    pub climb_to_top: bool,
    pub grounded: bool,
    /// 0 dead hang, 1 feet on the wall.
    pub hanging_blend: f32,
}

pub trait AnimSink {
    fn push(&mut self, agent: AgentId, params: &AnimParams);
}

impl AnimSink for () {
    fn push(&mut self, _agent: AgentId, _params: &AnimParams) {}
}

/// Keeps every push, oldest first.
#[derive(Clone, Debug, Default)]
pub struct AnimRecorder {
    pub frames: Vec<(AgentId, AnimParams)>,
}

impl AnimRecorder {
    pub fn last(&self, agent: AgentId) -> Option<&AnimParams> {
        self.frames.iter().rev().find(|(a, _)| *a == agent).map(|(_, p)| p)
    }
}

impl AnimSink for AnimRecorder {
    fn push(&mut self, agent: AgentId, params: &AnimParams) { self.frames.push((agent, *params)); }
}
