//! One hand/foot IK target pair. Weights are what the external IK solver reads.
use glam::Quat;
use riftclimb_core::{math::angle_axis, types::Vec3};

use crate::frames::{Frames, Parent, Target};
use crate::helpers::Side;
use crate::tween::RotationTween;

#[derive(Clone, Debug)]
pub struct EffectorPair {
    pub side: Side,
    pub hand: Target,
    pub foot: Target,
    /// Hand to foot offset in yaw space, captured at hook time.
    pub foot_dir: Vec3,
    hand_weight: f32,
    foot_weight: f32,
    rot_tween: Option<RotationTween>,
}

impl EffectorPair {
    pub fn new(side: Side, foot_dir: Vec3) -> Self {
        Self {
            side,
            hand: Target::default(),
            foot: Target::default(),
            foot_dir,
            hand_weight: 0.0,
            foot_weight: 0.0,
            rot_tween: None,
        }
    }

    #[inline] pub fn hand_weight(&self) -> f32 { self.hand_weight }
    #[inline] pub fn foot_weight(&self) -> f32 { self.foot_weight }
    #[inline] pub fn rotating(&self) -> bool { self.rot_tween.is_some() }

    pub fn set_weight(&mut self, w: f32) -> &mut Self {
        self.set_hand_weight(w);
        self.set_foot_weight(w)
    }
    pub fn set_hand_weight(&mut self, w: f32) -> &mut Self { self.hand_weight = w.clamp(0.0, 1.0); self }
    pub fn set_foot_weight(&mut self, w: f32) -> &mut Self { self.foot_weight = w.clamp(0.0, 1.0); self }

    /// Sideways offset of this hand from a grab point with wall normal `n`.
    pub fn grab_offset(&self, n: Vec3, lateral: f32) -> Vec3 {
        let o = angle_axis(90.0, Vec3::Y) * n * lateral;
        match self.side { Side::Left => o, Side::Right => -o }
    }

    #[inline]
    pub fn foot_target(&self, hand: Vec3, rot: Quat) -> Vec3 { hand + rot * self.foot_dir }

    /// Attaches both targets to `parent`, preserving world pose.
    pub fn hook(&mut self, parent: Parent, f: &Frames) -> &mut Self {
        self.hand.reparent(parent, f);
        self.foot.reparent(parent, f);
        self
    }

    pub fn unhook(&mut self, f: &Frames) -> &mut Self { self.hook(Parent::Rig, f) }

    #[inline] pub fn parent(&self) -> Parent { self.hand.parent }

    pub fn begin_rotation(&mut self, from: Quat, to: Quat, duration: f32) -> &mut Self {
        self.rot_tween = Some(RotationTween::new(from, to, duration));
        self
    }

    /// Advances the hand rotation blend, writing hand and foot rotations.
    pub fn update_rotation(&mut self, dt: f32, f: &Frames) {
        let Some(tw) = self.rot_tween.as_mut() else { return };
        match tw.step(dt) {
            Some(q) => {
                self.hand.set_world_rot(q, f);
                self.foot.set_world_rot(q, f);
            }
            None => self.rot_tween = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_collision::Scene;
    use riftclimb_core::{types::Isometry, vec3};

    #[test] fn grab_offsets_mirror() {
        let n = vec3(0.0, 0.0, -1.0);
        let l = EffectorPair::new(Side::Left, Vec3::ZERO);
        let r = EffectorPair::new(Side::Right, Vec3::ZERO);
        // facing +Z, the left hand sits at -X
        assert!((l.grab_offset(n, 0.1) - vec3(-0.1, 0.0, 0.0)).length() < 1e-6);
        assert!((l.grab_offset(n, 0.1) + r.grab_offset(n, 0.1)).length() < 1e-6);
    }

    #[test] fn weights_clamp() {
        let mut p = EffectorPair::new(Side::Left, Vec3::ZERO);
        p.set_weight(2.0);
        assert_eq!((p.hand_weight(), p.foot_weight()), (1.0, 1.0));
        p.set_foot_weight(-1.0);
        assert_eq!(p.foot_weight(), 0.0);
    }

    #[test] fn rotation_blend_finishes() {
        let scene = Scene::new();
        let f = Frames::new(Isometry::default(), &scene);
        let mut p = EffectorPair::new(Side::Right, Vec3::ZERO);
        let to = Quat::from_rotation_y(1.0);
        p.begin_rotation(Quat::IDENTITY, to, 0.5);
        p.update_rotation(0.25, &f);
        assert!(p.hand.world_rot(&f).angle_between(Quat::IDENTITY) > 0.1);
        p.update_rotation(0.3, &f);
        assert!(!p.rotating());
    }

    #[test] fn foot_follows_rotation() {
        let p = EffectorPair::new(Side::Left, vec3(0.0, -1.2, -0.2));
        let ft = p.foot_target(vec3(0.0, 1.4, 0.5), Quat::from_rotation_y(core::f32::consts::PI));
        assert!((ft - vec3(0.0, 0.2, 0.7)).length() < 1e-5);
    }
}
