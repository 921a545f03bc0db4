//! The climb state machine. One per agent; it owns the grab, the pose solver calibration,
//! the motion guard and, while climbing, the agent root.
use glam::Quat;
use riftclimb_controllers::{
    helpers::Side, BodySolver, EffectorPair, Frames, HookingData,
};
use riftclimb_core::{
    math::{euler_deg, lerp, look_rotation, yaw_only},
    types::{Isometry, Vec3},
};
use tracing::debug;

use crate::guard::{HorizontalDir, MotionDone, MotionGuard};
use crate::input::{ClimbEnv, ExternalMode};
use crate::settings::ClimbConfig;
use crate::state::{allowed, ClimbState, GrabOrigin, StateKind};

/// Wall angle and hanging blend interpolation started by a swap or traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WallBlend {
    pub current: f32,
    pub start: f32,
    pub target: f32,
    pub hang_start: f32,
    pub hang_target: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl WallBlend {
    #[inline] pub fn active(&self) -> bool { self.elapsed < self.duration }
    #[inline] fn t(&self) -> f32 { if self.duration > 0.0 { (self.elapsed / self.duration).clamp(0.0, 1.0) } else { 1.0 } }
}

pub struct ClimbMachine {
    pub(crate) cfg: ClimbConfig,
    pub(crate) state: ClimbState,
    pub(crate) time_in_state: f32,
    pub(crate) root: Isometry,
    pub(crate) hooking: HookingData,
    pub(crate) body: BodySolver,
    pub(crate) guard: MotionGuard,
    pub(crate) prev_dir: HorizontalDir,
    pub(crate) wall: WallBlend,
    /// Hanging blend pushed to the animation sink; 0 dead hang, 1 feet on the wall.
    pub(crate) hang: f32,
    /// Pair that led the last free-surface move.
    pub(crate) free_lead: Side,
}

impl ClimbMachine {
    pub fn new(cfg: ClimbConfig, root: Isometry) -> Self {
        Self {
            cfg,
            state: ClimbState::Detached,
            time_in_state: 0.0,
            root,
            hooking: HookingData::new(EffectorPair::new(Side::Left, Vec3::ZERO), EffectorPair::new(Side::Right, Vec3::ZERO)),
            body: BodySolver::new(cfg.body, cfg.hand.lateral_offset, cfg.rig.arm_center()),
            guard: MotionGuard::default(),
            prev_dir: HorizontalDir::None,
            wall: WallBlend::default(),
            hang: 1.0,
            free_lead: Side::Left,
        }
    }

    /* ---- accessors ---- */

    #[inline] pub fn config(&self) -> &ClimbConfig { &self.cfg }
    #[inline] pub fn state(&self) -> &ClimbState { &self.state }
    #[inline] pub fn kind(&self) -> StateKind { self.state.kind() }
    #[inline] pub fn time_in_state(&self) -> f32 { self.time_in_state }
    #[inline] pub fn root(&self) -> Isometry { self.root }
    #[inline] pub fn hooking(&self) -> &HookingData { &self.hooking }
    #[inline] pub fn body(&self) -> &BodySolver { &self.body }
    #[inline] pub fn guard(&self) -> &MotionGuard { &self.guard }
    #[inline] pub fn busy(&self) -> bool { self.guard.busy() }
    #[inline] pub fn prev_dir(&self) -> HorizontalDir { self.prev_dir }
    #[inline] pub fn wall_angle(&self) -> f32 { self.wall.current }
    #[inline] pub fn hanging_blend(&self) -> f32 { self.hang }
    #[inline] pub fn shoulder(&self) -> Vec3 { self.root.transform_point(self.cfg.rig.shoulder_root) }
    /// The machine writes the root pose in every state except `Detached`.
    #[inline] pub fn owns_root(&self) -> bool { self.kind() != StateKind::Detached }

    /// Pose from external locomotion; ignored while the machine owns the root.
    pub fn set_external_root(&mut self, pose: Isometry) -> bool {
        if self.owns_root() { return false; }
        self.root = pose;
        true
    }

    /* ---- transitions ---- */

    pub(crate) fn change_state(&mut self, next: ClimbState, env: &ClimbEnv) -> bool {
        let (from, to) = (self.kind(), next.kind());
        if !allowed(from, to) {
            debug!(?from, ?to, "climb transition rejected");
            return false;
        }
        debug!(?from, ?to, "climb transition");
        self.exit(from, to, env);
        self.state = next;
        self.time_in_state = 0.0;
        if !self.enter(env) {
            debug!(state = ?to, "climb state entry failed");
            self.state = ClimbState::Detached;
            return false;
        }
        true
    }

    fn exit(&mut self, from: StateKind, to: StateKind, env: &ClimbEnv) {
        let f = env.frames(self.root);
        match from {
            StateKind::Hooking => {
                if let ClimbState::Hooking { hanging: false, .. } = self.state {
                    for p in self.hooking.pairs_mut() { p.set_foot_weight(1.0); }
                }
            }
            StateKind::EdgeClimbing | StateKind::FreeClimbing if !to.climbing() => {
                for p in self.hooking.pairs_mut() { p.unhook(&f).set_weight(0.0); }
                self.hooking.set_edge(None);
                self.hang = 1.0;
                self.prev_dir = HorizontalDir::None;
                self.guard.clear();
                self.wall = WallBlend::default();
                self.body.reset();
            }
            _ => {}
        }
    }

    /// Only a hook whose target disappeared can fail to enter.
    fn enter(&mut self, env: &ClimbEnv) -> bool {
        match self.state {
            ClimbState::Hooking { origin, .. } => return self.enter_hooking(origin, env),
            ClimbState::EdgeClimbing | ClimbState::FreeClimbing => {
                for p in self.hooking.pairs_mut() { p.set_weight(1.0); }
                self.prev_dir = HorizontalDir::None;
                self.guard.clear();
            }
            ClimbState::ClimbToTop => self.root.rot = yaw_only(self.root.rot),
            ClimbState::Detached => {}
        }
        true
    }

    /* ---- tick phases ---- */

    /// Continuously evaluated transition requests against the current state.
    pub fn request(&mut self, env: &ClimbEnv) {
        match self.kind() {
            StateKind::Detached => {
                if env.input.climb && matches!(env.mode, ExternalMode::Airborne | ExternalMode::WallRun) {
                    self.request_hook(env);
                }
            }
            k if k.climbing() && env.input.drop => {
                self.change_state(ClimbState::Detached, env);
            }
            _ => {}
        }
    }

    /// Per-tick update of the active state, then its timed exit.
    pub fn update(&mut self, env: &ClimbEnv) {
        let kind = self.kind();
        match kind {
            StateKind::Hooking => self.update_hooking(env),
            StateKind::EdgeClimbing | StateKind::FreeClimbing => self.update_climbing(env),
            StateKind::ClimbToTop => self.root.pos += env.root_motion,
            StateKind::Detached => {}
        }
        if self.kind() != kind { return; }
        self.time_in_state += env.dt;
        let Some(limit) = kind.exit_time(self.cfg.hook.exit_time, self.cfg.wall_top.exit_time) else { return };
        if self.time_in_state < limit { return; }
        let next = match self.state {
            ClimbState::Hooking { origin: GrabOrigin::Edge(_), .. } => ClimbState::EdgeClimbing,
            ClimbState::Hooking { .. } => ClimbState::FreeClimbing,
            _ => ClimbState::Detached,
        };
        self.change_state(next, env);
    }

    fn update_climbing(&mut self, env: &ClimbEnv) {
        let (dt, lerp_time) = (env.dt, self.cfg.climb.effector_lerp_time);
        let f = env.frames(self.root);
        if let Some(done) = self.guard.step(dt, lerp_time, &mut self.hooking, &f) {
            self.finish_motion(done, env, &f);
        }

        let mid = self.hooking.hand_mid(&f);
        self.wall.elapsed += dt;
        if self.wall.active() {
            let t = self.wall.t();
            self.wall.current = lerp(self.wall.start, self.wall.target, t);
            self.hang = lerp(self.wall.hang_start, self.wall.hang_target, t).clamp(0.0, 1.0);
        } else {
            let contact = self.body.wall_contact(env.scene, mid, mid, self.root.rot * Vec3::Z);
            let step = if lerp_time > 0.0 { dt / lerp_time } else { 1.0 };
            if contact.support {
                self.wall.current = contact.angle;
                self.hang += step;
            } else {
                self.wall.current = self.cfg.body.support_threshold;
                self.hang -= step;
            }
            self.hang = self.hang.clamp(0.0, 1.0);
        }

        let hang = self.hang;
        for p in self.hooking.pairs_mut() {
            p.set_foot_weight(hang);
            p.update_rotation(dt, &f);
        }
        self.solve_root(&f);

        let valid = match self.kind() {
            StateKind::EdgeClimbing => self.busy() || self.hooking.edge_exists(env.tracker),
            _ => true,
        };
        if !valid {
            debug!("held edge lost");
            self.change_state(ClimbState::Detached, env);
        } else if !self.busy() {
            self.climb(env);
        }
    }

    fn finish_motion(&mut self, done: MotionDone, env: &ClimbEnv, f: &Frames) {
        debug!(?done, "motion finished");
        match done {
            MotionDone::Swap { next_edge } => self.hooking.set_edge(next_edge),
            MotionDone::Traversal { then } => {
                self.hooking.refresh_from_tracker(env.tracker, f);
                self.prev_dir = then;
            }
        }
    }

    /// Candidate moves in priority order; nothing happens without input.
    fn climb(&mut self, env: &ClimbEnv) {
        if env.input.idle() { return; }
        match self.kind() {
            StateKind::EdgeClimbing => {
                self.free_left_right(env, true);
                if self.hooking.edge_exists(env.tracker) { self.edge_traversal(env); }
                self.free_behind(env, true);
                self.wall_top(env);
                if self.kind() == StateKind::EdgeClimbing {
                    self.edge_swap(env, false);
                    self.free_forward(env, true);
                }
            }
            StateKind::FreeClimbing => {
                self.edge_swap(env, true);
                self.free_left_right(env, false);
                self.wall_top(env);
                if self.kind() == StateKind::FreeClimbing {
                    self.free_forward(env, false);
                    self.free_edges(env, false);
                    self.free_behind(env, false);
                }
            }
            _ => {}
        }
    }

    /* ---- shared pose helpers ---- */

    pub(crate) fn solve_root(&mut self, f: &Frames) {
        let l = self.hooking.hand_pos(Side::Left, f);
        let r = self.hooking.hand_pos(Side::Right, f);
        self.root = self.body.solve(l, r, yaw_only(self.root.rot), self.wall.current);
    }

    pub(crate) fn hand_rotation(&self, normal: Vec3, side: Side) -> Quat {
        look_rotation(-normal) * euler_deg(self.cfg.hand.hand_rotation(side))
    }

    pub(crate) fn snap_feet_to_tips(&mut self, f: &Frames) {
        for side in [Side::Left, Side::Right] {
            let tip = self.root.transform_point(self.cfg.rig.foot_tip(side));
            self.hooking.pair_mut(side).foot.set_world_pos(tip, f);
        }
    }

    /// Starts a wall-angle and hanging blend toward a solved pose. Returns the foot angle.
    pub(crate) fn set_hanging_blend(&mut self, angle: f32, support: bool, duration: f32, f: &Frames) -> f32 {
        let limit = self.cfg.body.support_threshold;
        let (target, foot, hang_target) = if angle > limit || !support { (limit, 0.0, 0.0) } else { (angle, angle, 1.0) };
        self.snap_feet_to_tips(f);
        self.wall = WallBlend {
            current: self.wall.current,
            start: self.wall.current,
            target,
            hang_start: self.hang,
            hang_target,
            elapsed: 0.0,
            duration,
        };
        foot
    }
}
