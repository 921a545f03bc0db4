//! The current grab: hook point attached to the held object, the held edge if any,
//! and both effector pairs.
use riftclimb_core::{math::{look_rotation, midpoint}, types::Vec3};
use riftclimb_edges::{EdgeData, EdgeHandle, EdgeTracker};

use crate::effector::EffectorPair;
use crate::frames::{Frames, Parent, Target};
use crate::helpers::Side;

#[derive(Clone, Debug)]
pub struct HookingData {
    pub point: Target,
    pub normal: Vec3,
    edge: Option<EdgeHandle>,
    pub left: EffectorPair,
    pub right: EffectorPair,
}

impl HookingData {
    pub fn new(left: EffectorPair, right: EffectorPair) -> Self {
        Self { point: Target::default(), normal: Vec3::ZERO, edge: None, left, right }
    }

    pub fn update_hooking_point(&mut self, p: Vec3, normal: Vec3, parent: Parent, f: &Frames) {
        self.point.parent = parent;
        self.point.set_world_pos(p, f);
        self.point.set_world_rot(look_rotation(normal), f);
        self.normal = normal;
    }

    #[inline] pub fn hooking_point(&self, f: &Frames) -> Vec3 { self.point.world_pos(f) }
    #[inline] pub fn parent(&self) -> Parent { self.point.parent }

    #[inline] pub fn set_edge(&mut self, edge: Option<EdgeHandle>) { self.edge = edge; }
    #[inline] pub fn edge(&self) -> Option<EdgeHandle> { self.edge }

    /// Whether the held edge is still in the tracked set.
    pub fn edge_exists(&self, tracker: &EdgeTracker) -> bool {
        self.edge.is_some_and(|h| tracker.contains(h))
    }

    pub fn current_edge<'t>(&self, tracker: &'t EdgeTracker) -> Option<&'t EdgeData> {
        self.edge.and_then(|h| tracker.get(h))
    }

    /// Re-resolves the hook point onto the held edge's current closest point.
    pub fn refresh_from_tracker(&mut self, tracker: &EdgeTracker, f: &Frames) -> bool {
        let Some(cp) = self.current_edge(tracker).map(|e| e.closest_point) else { return false };
        self.point.set_world_pos(cp, f);
        true
    }

    pub fn pair(&self, side: Side) -> &EffectorPair {
        match side { Side::Left => &self.left, Side::Right => &self.right }
    }
    pub fn pair_mut(&mut self, side: Side) -> &mut EffectorPair {
        match side { Side::Left => &mut self.left, Side::Right => &mut self.right }
    }

    #[inline] pub fn hand_pos(&self, side: Side, f: &Frames) -> Vec3 { self.pair(side).hand.world_pos(f) }
    #[inline] pub fn hand_mid(&self, f: &Frames) -> Vec3 { midpoint(self.hand_pos(Side::Left, f), self.hand_pos(Side::Right, f)) }

    pub fn pairs_mut(&mut self) -> [&mut EffectorPair; 2] { [&mut self.left, &mut self.right] }
}
