use std::collections::BTreeMap;

use riftclimb_core::{types::{Transform, Vec3}, ClimbableId, MeshId};
use riftclimb_geom::{Aabb, MeshAsset, MeshData};
use serde::{Deserialize, Serialize};

use crate::query::{CollisionQuery, RayHit, SceneObject, Tag};
use crate::tri::{closest_point_on_triangle, ray_triangle};

/// A placed mesh instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collider {
    pub id: ClimbableId,
    pub mesh: MeshId,
    pub tag: Tag,
    pub transform: Transform,
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool { true }

/// In-memory triangle-mesh scene. Collision reads mesh buffers directly and does not
/// require the asset to be CPU-readable.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    meshes: BTreeMap<MeshId, MeshAsset>,
    colliders: Vec<Collider>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self { Self::default() }

    pub fn add_mesh(&mut self, asset: MeshAsset) -> MeshId {
        let id = asset.id;
        self.meshes.insert(id, asset);
        id
    }

    /// Adds an instance; returns its id (assigned in insertion order).
    pub fn spawn(&mut self, mesh: MeshId, tag: Tag, transform: Transform) -> ClimbableId {
        let id = ClimbableId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, mesh, tag, transform, active: true });
        id
    }

    /// Inserts a fully described collider, keeping ids unique.
    pub fn insert(&mut self, c: Collider) {
        self.next_id = self.next_id.max(c.id.0 + 1);
        match self.colliders.binary_search_by_key(&c.id, |x| x.id) {
            Ok(i) => self.colliders[i] = c,
            Err(i) => self.colliders.insert(i, c),
        }
    }

    #[inline] pub fn mesh(&self, id: MeshId) -> Option<&MeshAsset> { self.meshes.get(&id) }
    #[inline] pub fn meshes(&self) -> impl Iterator<Item = &MeshAsset> { self.meshes.values() }
    #[inline] pub fn colliders(&self) -> &[Collider] { &self.colliders }
    pub fn collider(&self, id: ClimbableId) -> Option<&Collider> { self.colliders.iter().find(|c| c.id == id) }
    pub fn collider_mut(&mut self, id: ClimbableId) -> Option<&mut Collider> { self.colliders.iter_mut().find(|c| c.id == id) }
    #[inline] pub fn transform(&self, id: ClimbableId) -> Option<Transform> { self.collider(id).map(|c| c.transform) }

    pub fn set_transform(&mut self, id: ClimbableId, xf: Transform) -> bool {
        match self.collider_mut(id) { Some(c) => { c.transform = xf; true } None => false }
    }

    pub fn set_active(&mut self, id: ClimbableId, active: bool) -> bool {
        match self.collider_mut(id) { Some(c) => { c.active = active; true } None => false }
    }

    /// Active objects carrying `tag`.
    pub fn tagged(&self, tag: Tag) -> impl Iterator<Item = &Collider> {
        self.colliders.iter().filter(move |c| c.active && c.tag == tag)
    }

    /* ---- internals ---- */

    fn active(&self) -> impl Iterator<Item = (&Collider, &MeshData)> {
        self.colliders.iter().filter(|c| c.active).filter_map(|c| self.meshes.get(&c.mesh).map(|m| (c, &m.data)))
    }

    fn world_triangles<'a>(c: &'a Collider, m: &'a MeshData) -> impl Iterator<Item = [Vec3; 3]> + 'a {
        let nv = m.vertices.len();
        m.indices.chunks_exact(3).filter_map(move |ix| {
            if ix.iter().any(|&i| i as usize >= nv) { return None; }
            let p = |k: usize| c.transform.transform_point(m.vertices[ix[k] as usize]);
            let t = [p(0), p(1), p(2)];
            ((t[1] - t[0]).cross(t[2] - t[0]).length_squared() > 1.0e-14).then_some(t)
        })
    }

    fn world_bounds(c: &Collider, m: &MeshData) -> Aabb { m.bounds().transformed(&c.transform) }

    fn sphere_hits(&self, c: &Collider, m: &MeshData, p: Vec3, r: f32) -> bool {
        if !Self::world_bounds(c, m).overlaps_sphere(p, r) { return false; }
        Self::world_triangles(c, m).any(|[a, b, cc]| closest_point_on_triangle(p, a, b, cc).distance_squared(p) <= r * r)
    }

    fn ray_hits(&self, origin: Vec3, dir: Vec3, max: f32) -> Vec<RayHit> {
        let d = dir.normalize_or_zero();
        if d == Vec3::ZERO || max <= 0.0 { return Vec::new(); }
        let seg = Aabb::from_points([origin, origin + d * max]).unwrap_or_default();
        let mut out = Vec::new();
        for (c, m) in self.active() {
            if !Self::world_bounds(c, m).overlaps(&seg) { continue; }
            let mut best: Option<(f32, Vec3)> = None;
            for [a, b, cc] in Self::world_triangles(c, m) {
                if let Some(t) = ray_triangle(origin, d, a, b, cc) {
                    if t <= max && best.map_or(true, |(bt, _)| t < bt) {
                        let mut n = (b - a).cross(cc - a).normalize_or_zero();
                        if n.dot(d) > 0.0 { n = -n; }
                        best = Some((t, n));
                    }
                }
            }
            if let Some((t, n)) = best {
                out.push(RayHit { point: origin + d * t, normal: n, distance: t, tag: c.tag, collider: c.id });
            }
        }
        out.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.collider.cmp(&b.collider)));
        out
    }
}

impl CollisionQuery for Scene {
    fn raycast(&self, origin: Vec3, dir: Vec3, max: f32) -> Option<RayHit> {
        self.ray_hits(origin, dir, max).into_iter().next()
    }

    fn raycast_all(&self, origin: Vec3, dir: Vec3, max: f32) -> Vec<RayHit> { self.ray_hits(origin, dir, max) }

    fn check_sphere(&self, p: Vec3, r: f32) -> bool {
        self.active().any(|(c, m)| self.sphere_hits(c, m, p, r))
    }

    // swept as overlapping spheres spaced at half the radius
    fn check_capsule(&self, a: Vec3, b: Vec3, r: f32) -> bool {
        let len = a.distance(b);
        let steps = if r > 0.0 { (len / (r * 0.5)).ceil().max(1.0) as usize } else { 1 };
        (0..=steps).any(|i| self.check_sphere(a.lerp(b, i as f32 / steps as f32), r))
    }

    fn overlap_sphere(&self, p: Vec3, r: f32) -> Vec<ClimbableId> {
        let mut ids: Vec<ClimbableId> = self.active().filter(|(c, m)| self.sphere_hits(c, m, p, r)).map(|(c, _)| c.id).collect();
        ids.sort_unstable();
        ids
    }

    fn object(&self, id: ClimbableId) -> Option<SceneObject<'_>> {
        let c = self.collider(id)?;
        let mesh = self.meshes.get(&c.mesh)?;
        Some(SceneObject { tag: c.tag, transform: c.transform, mesh })
    }

    fn climbables(&self) -> Vec<ClimbableId> {
        self.colliders.iter().filter(|c| matches!(c.tag, Tag::Climbable | Tag::FreeClimbable)).map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_core::vec3;

    fn ledge_scene() -> (Scene, ClimbableId) {
        let mut s = Scene::new();
        let m = s.add_mesh(MeshAsset::new(MeshId(0), MeshData::cuboid(vec3(1.0, 0.5, 0.5))));
        let id = s.spawn(m, Tag::Climbable, Transform { pos: vec3(0.0, 1.0, 1.0), ..Default::default() });
        (s, id)
    }

    #[test] fn raycast_nearest_face() {
        let (s, id) = ledge_scene();
        let h = s.raycast(vec3(0.0, 1.0, -1.0), Vec3::Z, 5.0).unwrap();
        assert_eq!(h.collider, id);
        assert_eq!(h.tag, Tag::Climbable);
        assert!((h.distance - 1.5).abs() < 1e-5);
        assert!((h.normal + Vec3::Z).length() < 1e-5);
        assert!(s.raycast(vec3(0.0, 1.0, -1.0), Vec3::Z, 1.0).is_none());
    }

    #[test] fn raycast_all_sorted() {
        let (s, _) = ledge_scene();
        let hits = s.raycast_all(vec3(0.0, 1.0, -1.0), Vec3::Z, 10.0);
        // one hit per collider
        assert_eq!(hits.len(), 1);
    }

    #[test] fn sphere_and_capsule() {
        let (s, id) = ledge_scene();
        assert!(s.check_sphere(vec3(0.0, 1.0, 0.35), 0.2));
        assert!(!s.check_sphere(vec3(0.0, 1.0, 0.2), 0.2));
        assert!(s.check_capsule(vec3(0.0, 0.0, 0.3), vec3(0.0, 2.0, 0.3), 0.25));
        assert_eq!(s.overlap_sphere(vec3(0.0, 1.0, 0.0), 0.6), vec![id]);
    }

    #[test] fn inactive_is_ignored() {
        let (mut s, id) = ledge_scene();
        s.set_active(id, false);
        assert!(s.raycast(vec3(0.0, 1.0, -1.0), Vec3::Z, 5.0).is_none());
        assert!(s.overlap_sphere(vec3(0.0, 1.0, 1.0), 1.0).is_empty());
        // still reachable by id for frames and the tracker cache
        assert_eq!(s.object(id).map(|o| o.transform.pos), Some(vec3(0.0, 1.0, 1.0)));
    }

    #[test] fn climbables_skip_untagged() {
        let (mut s, id) = ledge_scene();
        let m = MeshId(0);
        s.spawn(m, Tag::Untagged, Transform::default());
        let free = s.spawn(m, Tag::FreeClimbable, Transform::default());
        assert_eq!(s.climbables(), vec![id, free]);
        let o = s.object(free).unwrap();
        assert_eq!(o.tag, Tag::FreeClimbable);
        assert_eq!(o.mesh.id, m);
    }
}
