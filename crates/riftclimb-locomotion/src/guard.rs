//! The single in-flight hand move. Owned by the machine; while it holds a motion every
//! new swap or traversal request is refused.
use glam::Quat;
use riftclimb_controllers::{helpers::Side, Ease, Frames, HookingData, Parent, Tween};
use riftclimb_core::types::Vec3;
use riftclimb_edges::EdgeHandle;
use tracing::debug;

/// Direction of the last lateral traversal, used to re-gather the trailing hand.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HorizontalDir {
    #[default]
    None,
    Left,
    Right,
}

/// Position blend in the target's parent space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lerp3 { pub from: Vec3, pub to: Vec3 }

impl Lerp3 {
    #[inline] pub fn new(from: Vec3, to: Vec3) -> Self { Self { from, to } }
    #[inline] pub fn at(&self, t: f32) -> Vec3 { self.from.lerp(self.to, t) }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapPhase { First, Second }

/// Two-phase grab change: the leading pair moves, then the trailing one.
#[derive(Clone, Debug)]
pub struct SwapMotion {
    pub first: Side,
    pub phase: SwapPhase,
    pub tween: Tween,
    pub hand: Lerp3,
    pub foot: Lerp3,
    /// Trailing pair targets, local to `parent`.
    pub second_hand: Vec3,
    pub second_foot: Vec3,
    pub second_rot: Quat,
    pub parent: Parent,
    pub next_edge: Option<EdgeHandle>,
}

/// One hand slides along the held edge while both feet follow.
#[derive(Clone, Debug)]
pub struct TraversalMotion {
    pub side: Side,
    pub tween: Tween,
    pub hand: Lerp3,
    /// Left, right.
    pub feet: [Lerp3; 2],
    pub then: HorizontalDir,
}

#[derive(Clone, Debug)]
pub enum Motion {
    Swap(SwapMotion),
    Traversal(TraversalMotion),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionDone {
    Swap { next_edge: Option<EdgeHandle> },
    Traversal { then: HorizontalDir },
}

#[derive(Clone, Debug, Default)]
pub struct MotionGuard {
    motion: Option<Motion>,
}

impl MotionGuard {
    #[inline] pub fn busy(&self) -> bool { self.motion.is_some() }
    #[inline] pub fn motion(&self) -> Option<&Motion> { self.motion.as_ref() }
    pub fn clear(&mut self) { self.motion = None; }

    /// Refused while another motion is in flight.
    pub fn begin(&mut self, m: Motion) -> bool {
        if self.busy() {
            debug!("motion refused, guard busy");
            return false;
        }
        self.motion = Some(m);
        true
    }

    /// Advances the in-flight motion, writing target positions. Returns what finished.
    pub fn step(&mut self, dt: f32, lerp_time: f32, hd: &mut HookingData, f: &Frames) -> Option<MotionDone> {
        let done = match self.motion.as_mut()? {
            Motion::Swap(s) => {
                let t = s.tween.step(dt);
                let pair = hd.pair_mut(match s.phase { SwapPhase::First => s.first, SwapPhase::Second => s.first.other() });
                pair.hand.pos = s.hand.at(t);
                pair.foot.pos = s.foot.at(t);
                match (s.tween.done(), s.phase) {
                    (false, _) => None,
                    (true, SwapPhase::First) => {
                        let trailing = hd.pair_mut(s.first.other());
                        trailing.hook(s.parent, f);
                        let from = trailing.hand.world_rot(f);
                        trailing.begin_rotation(from, s.second_rot, lerp_time);
                        s.hand = Lerp3::new(trailing.hand.pos, s.second_hand);
                        s.foot = Lerp3::new(trailing.foot.pos, s.second_foot);
                        s.phase = SwapPhase::Second;
                        s.tween = Tween::new(lerp_time, s.tween.ease);
                        None
                    }
                    (true, SwapPhase::Second) => Some(MotionDone::Swap { next_edge: s.next_edge }),
                }
            }
            Motion::Traversal(m) => {
                let t = m.tween.step(dt);
                hd.pair_mut(m.side).hand.pos = m.hand.at(t);
                hd.left.foot.pos = m.feet[0].at(t);
                hd.right.foot.pos = m.feet[1].at(t);
                m.tween.done().then_some(MotionDone::Traversal { then: m.then })
            }
        };
        if done.is_some() { self.motion = None; }
        done
    }
}

/// Default easing of hand and foot moves.
pub const MOTION_EASE: Ease = Ease::InOutSine;

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_collision::Scene;
    use riftclimb_controllers::EffectorPair;
    use riftclimb_core::{types::Isometry, vec3};

    fn hooking() -> HookingData {
        HookingData::new(EffectorPair::new(Side::Left, Vec3::ZERO), EffectorPair::new(Side::Right, Vec3::ZERO))
    }

    fn traversal(then: HorizontalDir) -> Motion {
        let still = Lerp3::new(Vec3::ZERO, Vec3::ZERO);
        Motion::Traversal(TraversalMotion {
            side: Side::Left,
            tween: Tween::new(0.5, MOTION_EASE),
            hand: Lerp3::new(Vec3::ZERO, vec3(-0.3, 0.0, 0.0)),
            feet: [still, still],
            then,
        })
    }

    #[test] fn second_request_refused_while_busy() {
        let scene = Scene::new();
        let f = Frames::new(Isometry::default(), &scene);
        let mut hd = hooking();
        let mut g = MotionGuard::default();
        assert!(g.begin(traversal(HorizontalDir::Left)));
        assert!(!g.begin(traversal(HorizontalDir::Right)));
        assert_eq!(g.step(0.3, 0.5, &mut hd, &f), None);
        assert!(g.busy());
        assert_eq!(g.step(0.3, 0.5, &mut hd, &f), Some(MotionDone::Traversal { then: HorizontalDir::Left }));
        assert!(!g.busy());
        assert!((hd.left.hand.pos - vec3(-0.3, 0.0, 0.0)).length() < 1e-6);
    }

    #[test] fn swap_holds_guard_through_both_phases() {
        let scene = Scene::new();
        let f = Frames::new(Isometry::default(), &scene);
        let mut hd = hooking();
        let mut g = MotionGuard::default();
        let swap = SwapMotion {
            first: Side::Right,
            phase: SwapPhase::First,
            tween: Tween::new(0.5, MOTION_EASE),
            hand: Lerp3::new(Vec3::ZERO, vec3(0.5, 0.2, 0.0)),
            foot: Lerp3::new(Vec3::ZERO, vec3(0.5, -1.0, 0.0)),
            second_hand: vec3(0.3, 0.2, 0.0),
            second_foot: vec3(0.3, -1.0, 0.0),
            second_rot: Quat::IDENTITY,
            parent: Parent::Rig,
            next_edge: None,
        };
        assert!(g.begin(Motion::Swap(swap)));
        g.step(0.3, 0.5, &mut hd, &f);
        g.step(0.3, 0.5, &mut hd, &f);
        // leading pair arrived, trailing pair still moving
        assert!(g.busy());
        assert!((hd.right.hand.pos - vec3(0.5, 0.2, 0.0)).length() < 1e-6);
        assert!(!g.begin(traversal(HorizontalDir::None)));
        assert_eq!(g.step(0.3, 0.5, &mut hd, &f), None);
        assert_eq!(g.step(0.3, 0.5, &mut hd, &f), Some(MotionDone::Swap { next_edge: None }));
        assert!(!g.busy());
        assert!((hd.left.foot.pos - vec3(0.3, -1.0, 0.0)).length() < 1e-6);
    }
}
