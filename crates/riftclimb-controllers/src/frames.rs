//! Attachment frames for effector targets. A target stores a pose local to its parent
//! and is resolved into world space every time it is read.
use glam::Quat;
use riftclimb_collision::CollisionQuery;
use riftclimb_core::{types::{Isometry, Transform, Vec3}, ClimbableId};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Parent {
    /// The agent root.
    #[default]
    Rig,
    Climbable(ClimbableId),
}

/// Resolves parents into world transforms for one tick.
#[derive(Copy, Clone)]
pub struct Frames<'a> {
    pub root: Isometry,
    pub scene: &'a dyn CollisionQuery,
}

impl<'a> Frames<'a> {
    pub fn new(root: Isometry, scene: &'a dyn CollisionQuery) -> Self { Self { root, scene } }

    /// A climbable that vanished from the scene resolves to identity.
    pub fn frame(&self, parent: Parent) -> Transform {
        match parent {
            Parent::Rig => Transform::from_iso(self.root),
            Parent::Climbable(id) => self.scene.object(id).map(|o| o.transform).unwrap_or_default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub parent: Parent,
    pub pos: Vec3,
    pub rot: Quat,
}

impl Default for Target {
    fn default() -> Self { Self { parent: Parent::Rig, pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Target {
    pub fn at_rest(pos: Vec3) -> Self { Self { pos, ..Default::default() } }

    #[inline] pub fn world_pos(&self, f: &Frames) -> Vec3 { f.frame(self.parent).transform_point(self.pos) }
    #[inline] pub fn world_rot(&self, f: &Frames) -> Quat { (f.frame(self.parent).rot * self.rot).normalize() }

    pub fn set_world_pos(&mut self, p: Vec3, f: &Frames) {
        self.pos = f.frame(self.parent).inverse_transform_point(p);
    }
    pub fn set_world_rot(&mut self, q: Quat, f: &Frames) {
        self.rot = (f.frame(self.parent).rot.inverse() * q).normalize();
    }

    /// Moves the target under a new parent without changing its world pose.
    pub fn reparent(&mut self, parent: Parent, f: &Frames) {
        if parent == self.parent { return; }
        let (p, q) = (self.world_pos(f), self.world_rot(f));
        self.parent = parent;
        self.set_world_pos(p, f);
        self.set_world_rot(q, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_collision::{Scene, Tag};
    use riftclimb_core::{iso, vec3};
    use riftclimb_geom::{MeshAsset, MeshData};
    use riftclimb_core::MeshId;

    fn scene_with_box(xf: Transform) -> (Scene, ClimbableId) {
        let mut s = Scene::new();
        let m = s.add_mesh(MeshAsset::new(MeshId(1), MeshData::cuboid(Vec3::splat(0.5))));
        let id = s.spawn(m, Tag::Climbable, xf);
        (s, id)
    }

    #[test] fn reparent_keeps_world_pose() {
        let xf = Transform { pos: vec3(1.0, 2.0, 3.0), rot: Quat::from_rotation_y(0.7), scale: vec3(2.0, 1.0, 1.0) };
        let (scene, id) = scene_with_box(xf);
        let f = Frames::new(iso(vec3(0.0, 0.1, 0.0), Quat::from_rotation_y(-0.3)), &scene);
        let mut t = Target::default();
        t.set_world_pos(vec3(0.4, 1.5, 0.5), &f);
        t.set_world_rot(Quat::from_rotation_x(0.2), &f);
        t.reparent(Parent::Climbable(id), &f);
        assert!((t.world_pos(&f) - vec3(0.4, 1.5, 0.5)).length() < 1e-5);
        assert!(t.world_rot(&f).angle_between(Quat::from_rotation_x(0.2)) < 1e-4);
    }

    #[test] fn attached_target_follows_parent() {
        let (mut scene, id) = scene_with_box(Transform::default());
        let mut t = Target::default();
        {
            let f = Frames::new(Isometry::default(), &scene);
            t.reparent(Parent::Climbable(id), &f);
            t.set_world_pos(vec3(0.0, 1.0, 0.0), &f);
        }
        scene.set_transform(id, Transform { pos: vec3(0.0, 0.0, 2.0), ..Default::default() });
        let f = Frames::new(Isometry::default(), &scene);
        assert!((t.world_pos(&f) - vec3(0.0, 1.0, 2.0)).length() < 1e-6);
    }
}
