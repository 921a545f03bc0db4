mod profile;
mod anim;
mod agent;

pub use profile::{ClimbProfile, ProfileError};
pub use anim::{AnimParams, AnimRecorder, AnimSink};
pub use agent::{Agent, AgentId};

use riftclimb_collision::Scene;
use riftclimb_core::{hash_quat, hash_vec3, types::{Isometry, Vec3}, StepHasher, TickCtx};
use riftclimb_locomotion::{ClimbEnv, ClimbInput, ExternalMode};
use tracing::{debug, trace};

/// Per-step summary.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepReport {
    pub tick: u64,
    pub dt: f32,
    pub agents: u32,
    pub climbing: u32,
    pub tracked_edges: u32,
    pub hash: [u8; 32],
}

/* ---------------- World ---------------- */
pub struct ClimbWorld {
    scene: Scene,
    profile: ClimbProfile,
    agents: Vec<Agent>,
    tick: u64,
}

impl ClimbWorld {
    pub fn new(scene: Scene, profile: ClimbProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        Ok(Self { scene, profile, agents: Vec::new(), tick: 0 })
    }

    #[inline] pub fn scene(&self) -> &Scene { &self.scene }
    /// Climbables may be moved between steps; held grabs follow them.
    #[inline] pub fn scene_mut(&mut self) -> &mut Scene { &mut self.scene }
    #[inline] pub fn profile(&self) -> &ClimbProfile { &self.profile }
    #[inline] pub fn tick(&self) -> u64 { self.tick }
    #[inline] pub fn agents(&self) -> &[Agent] { &self.agents }
    pub fn agent(&self, id: AgentId) -> Option<&Agent> { self.agents.get(id.0 as usize) }
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> { self.agents.get_mut(id.0 as usize) }

    pub fn spawn_agent(&mut self, root: Isometry) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        let mut a = Agent::new(id, root, &self.profile);
        a.tracker.prime(&self.scene);
        debug!(?id, ?root, "agent spawned");
        self.agents.push(a);
        id
    }

    /// Input for the next step.
    pub fn set_input(&mut self, id: AgentId, input: ClimbInput, mode: ExternalMode) -> bool {
        let Some(a) = self.agent_mut(id) else { return false };
        a.input = input;
        a.mode = mode;
        true
    }

    /// Pose from external locomotion. Ignored while the climb machine owns the root.
    pub fn set_external_root(&mut self, id: AgentId, pose: Isometry) -> bool {
        match self.agent_mut(id) {
            Some(a) if !a.machine.owns_root() => { a.root = pose; true }
            _ => false,
        }
    }

    /// Root displacement from the animation driver, consumed by the next step.
    pub fn add_root_motion(&mut self, id: AgentId, delta: Vec3) -> bool {
        let Some(a) = self.agent_mut(id) else { return false };
        a.root_motion += delta;
        true
    }

    pub fn step(&mut self, dt: f32, sink: &mut dyn AnimSink) -> StepReport {
        self.tick = self.tick.wrapping_add(1);
        let ctx = TickCtx::new(dt, self.tick);
        let mut report = StepReport { tick: ctx.tick, dt, agents: self.agents.len() as u32, ..Default::default() };
        for a in &mut self.agents {
            step_agent(&self.scene, a, &ctx);
            if a.machine.kind().hooked() { report.climbing += 1; }
            report.tracked_edges += a.tracker.len() as u32;
            sink.push(a.id, &a.anim_params());
        }
        report.hash = self.step_hash();
        trace!(?report, "climb world step");
        report
    }

    /// Digest of every agent's root and climb state.
    pub fn step_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(b"CLIMBv1\0");
        h.update_bytes(&self.tick.to_le_bytes());
        for a in &self.agents {
            hash_vec3(&mut h, &a.root.pos);
            hash_quat(&mut h, &a.root.rot);
            h.update_bytes(&[a.machine.kind() as u8]);
            h.update_bytes(&a.machine.hanging_blend().to_le_bytes());
        }
        h.finalize()
    }
}

/// Tracker, then transition requests, then the active state, then root handoff.
fn step_agent(scene: &Scene, a: &mut Agent, ctx: &TickCtx) {
    if !a.machine.owns_root() { a.machine.set_external_root(a.root); }
    a.tracker.update(scene, a.machine.shoulder());

    let env = ClimbEnv {
        scene,
        tracker: &a.tracker,
        input: a.input,
        mode: a.mode,
        dt: ctx.dt,
        root_motion: a.root_motion,
    };
    a.machine.request(&env);
    a.machine.update(&env);

    if a.machine.owns_root() {
        a.root = a.machine.root();
    } else {
        a.root.pos += a.root_motion;
    }
    a.root_motion = Vec3::ZERO;
}
