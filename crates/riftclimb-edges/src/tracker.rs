use std::collections::{HashMap, HashSet};

use riftclimb_collision::{CollisionQuery, Tag};
use riftclimb_core::{math::angle_deg, types::{Transform, Vec3}, ClimbableId};
use riftclimb_geom::{closest_point_on_segment, Edge, Triangle, TrianglePair};
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::extractor::EdgeCache;
use crate::settings::EdgeDetectionSettings;

new_key_type! {
    /// Stable handle to a tracked edge; stays valid for as long as the edge keeps passing the filters.
    pub struct EdgeHandle;
}

/// Identity of a tracked edge: owning object + object-space edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdgeKey {
    pub climbable: ClimbableId,
    pub edge: Edge,
}

/// World-space state of a tracked edge, refreshed in place every tick.
#[derive(Copy, Clone, Debug)]
pub struct EdgeData {
    pub climbable: ClimbableId,
    pub local: Edge,
    pub edge: [Vec3; 2],
    pub closest_point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

impl EdgeData {
    #[inline] pub fn key(&self) -> EdgeKey { EdgeKey { climbable: self.climbable, edge: self.local } }
    #[inline] pub fn length(&self) -> f32 { self.edge[0].distance(self.edge[1]) }
    /// Closest point on the world segment to `p`.
    #[inline] pub fn closest_to(&self, p: Vec3) -> Vec3 { closest_point_on_segment(self.edge[0], self.edge[1], p) }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub objects: usize,
    pub parsed: usize,
    pub tracked: usize,
    pub created: usize,
    pub dropped: usize,
}

pub struct EdgeTracker {
    settings: EdgeDetectionSettings,
    cache: EdgeCache,
    records: SlotMap<EdgeHandle, EdgeData>,
    index: HashMap<EdgeKey, EdgeHandle>,
    tracked: Vec<EdgeHandle>,
    center: Vec3,
}

/* ---- filters ---- */

#[inline]
fn face_up_angle(t: &Triangle, xf: &Transform) -> f32 { angle_deg(Vec3::Y, xf.transform_normal(t.cross())) }

fn valid_orientation(s: &EdgeDetectionSettings, xf: &Transform, e: &Edge, p: &TrianglePair) -> bool {
    let top = |t: &Triangle| face_up_angle(t, xf) < s.horizontal_alignment;
    if !(top(&p.t0) || p.t1.as_ref().is_some_and(top)) { return false; }
    let a = angle_deg(Vec3::Y, xf.transform_vector(e.direction()));
    s.min_vertical_edge_angle < a && a < s.max_vertical_edge_angle
}

/// World normal of the wall-side face (the one further from up).
fn edge_normal(p: &TrianglePair, xf: &Transform) -> Vec3 {
    match &p.t1 {
        Some(t1) if face_up_angle(&p.t0, xf) <= face_up_angle(t1, xf) => xf.transform_normal(t1.normal),
        _ => xf.transform_normal(p.t0.normal),
    }
}

impl EdgeTracker {
    pub fn new(settings: EdgeDetectionSettings) -> Self {
        Self {
            settings,
            cache: EdgeCache::new(),
            records: SlotMap::with_key(),
            index: HashMap::new(),
            tracked: Vec::new(),
            center: Vec3::ZERO,
        }
    }

    #[inline] pub fn settings(&self) -> &EdgeDetectionSettings { &self.settings }
    #[inline] pub fn cache(&self) -> &EdgeCache { &self.cache }
    /// Detection center used by the last update.
    #[inline] pub fn center(&self) -> Vec3 { self.center }

    /// Parses every climbable mesh up front so the first ticks do not pay for it.
    pub fn prime<Q: CollisionQuery + ?Sized>(&mut self, scene: &Q) {
        for id in scene.climbables() {
            if let Some(obj) = scene.object(id) { self.cache.get_or_parse(obj.mesh, &self.settings); }
        }
    }

    /// Rebuilds the tracked set around `center`. Surviving edges keep their handle.
    pub fn update<Q: CollisionQuery + ?Sized>(&mut self, scene: &Q, center: Vec3) -> TrackerStats {
        let s = self.settings;
        let mut stats = TrackerStats::default();
        let mut next: Vec<EdgeHandle> = Vec::new();
        self.center = center;

        for id in scene.overlap_sphere(center, s.search_radius) {
            let Some(obj) = scene.object(id) else { continue };
            if !matches!(obj.tag, Tag::Climbable | Tag::FreeClimbable) { continue; }
            stats.objects += 1;
            let xf = obj.transform;
            let map = self.cache.get_or_parse(obj.mesh, &s);

            for (local, pair) in map.iter() {
                stats.parsed += 1;
                if !valid_orientation(&s, &xf, local, pair) { continue; }
                let world = Edge::new(xf.transform_point(local.v0), xf.transform_point(local.v1));
                if world.length() < s.min_edge_width { continue; }
                let closest = closest_point_on_segment(world.v0, world.v1, center);
                let distance = center.distance(closest);
                if distance >= s.search_radius { continue; }

                let data = EdgeData {
                    climbable: id,
                    local: *local,
                    edge: world.vertices(),
                    closest_point: closest,
                    normal: edge_normal(pair, &xf),
                    distance,
                };
                let key = data.key();
                let h = match self.index.get(&key).copied().filter(|h| self.records.contains_key(*h)) {
                    Some(h) => { self.records[h] = data; h }
                    None => {
                        stats.created += 1;
                        let h = self.records.insert(data);
                        self.index.insert(key, h);
                        h
                    }
                };
                next.push(h);
            }
        }

        let live: HashSet<EdgeHandle> = next.iter().copied().collect();
        let before = self.records.len();
        self.records.retain(|h, _| live.contains(&h));
        stats.dropped = before - self.records.len();
        self.index.retain(|_, h| live.contains(h));

        let records = &self.records;
        next.sort_by(|a, b| records[*a].distance.total_cmp(&records[*b].distance));
        self.tracked = next;
        stats.tracked = self.tracked.len();
        trace!(?stats, "edge tracker update");
        stats
    }

    /* ---- queries ---- */

    #[inline] pub fn len(&self) -> usize { self.tracked.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.tracked.is_empty() }
    /// Handles ordered by ascending distance.
    #[inline] pub fn tracked(&self) -> &[EdgeHandle] { &self.tracked }
    #[inline] pub fn get(&self, h: EdgeHandle) -> Option<&EdgeData> { self.records.get(h) }
    #[inline] pub fn contains(&self, h: EdgeHandle) -> bool { self.records.contains_key(h) }
    pub fn find(&self, key: &EdgeKey) -> Option<EdgeHandle> { self.index.get(key).copied() }
    pub fn nearest(&self, i: usize) -> Option<(EdgeHandle, &EdgeData)> {
        self.tracked.get(i).map(|&h| (h, &self.records[h]))
    }
    pub fn iter(&self) -> impl Iterator<Item = (EdgeHandle, &EdgeData)> + '_ {
        self.tracked.iter().map(move |&h| (h, &self.records[h]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_collision::Scene;
    use std::f32::consts::FRAC_PI_2;
    use riftclimb_core::{vec3, MeshId, Quat};
    use riftclimb_geom::{MeshAsset, MeshData};

    fn scene_with_ledge(pos: Vec3) -> (Scene, ClimbableId) {
        let mut s = Scene::new();
        let m = s.add_mesh(MeshAsset::new(MeshId(1), MeshData::cuboid(vec3(0.5, 0.25, 0.25))));
        let id = s.spawn(m, Tag::Climbable, Transform { pos, ..Default::default() });
        (s, id)
    }

    #[test] fn ledge_edge_normal_faces_the_wall() {
        let (s, id) = scene_with_ledge(vec3(0.0, 1.25, 0.75));
        let mut t = EdgeTracker::new(EdgeDetectionSettings::default());
        t.update(&s, vec3(0.0, 1.4, 0.0));
        let (_, nearest) = t.nearest(0).unwrap();
        assert_eq!(nearest.climbable, id);
        // top-front edge at z = 0.5, y = 1.5
        assert!((nearest.closest_point - vec3(0.0, 1.5, 0.5)).length() < 1e-5);
        assert!((nearest.normal + Vec3::Z).length() < 1e-5);
        // vertical and bottom edges never qualify
        for (_, e) in t.iter() {
            assert!((e.edge[0].y - e.edge[1].y).abs() < 1e-5);
            assert!((e.edge[0].y - 1.5).abs() < 1e-5);
        }
    }

    #[test] fn sorted_by_distance() {
        let (mut s, _) = scene_with_ledge(vec3(0.0, 1.25, 0.75));
        let m = MeshId(1);
        s.spawn(m, Tag::FreeClimbable, Transform { pos: vec3(0.6, 1.0, -0.6), ..Default::default() });
        let mut t = EdgeTracker::new(EdgeDetectionSettings::default());
        t.update(&s, vec3(0.1, 1.3, 0.1));
        assert!(t.len() > 4);
        let d: Vec<f32> = t.iter().map(|(_, e)| e.distance).collect();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test] fn rotated_and_scaled_ledge_in_world_space() {
        let mut s = Scene::new();
        let m = s.add_mesh(MeshAsset::new(MeshId(1), MeshData::cuboid(vec3(0.5, 0.25, 0.25))));
        // local x is stretched to 2 m and turned onto world -z; the near face ends up at x = 0.5
        let xf = Transform { pos: vec3(0.75, 1.25, 0.0), rot: Quat::from_rotation_y(FRAC_PI_2), scale: vec3(2.0, 1.0, 1.0) };
        let id = s.spawn(m, Tag::Climbable, xf);
        let mut t = EdgeTracker::new(EdgeDetectionSettings::default());
        t.update(&s, vec3(0.0, 1.4, 0.0));
        assert_eq!(t.len(), 4);

        let (_, near) = t.nearest(0).unwrap();
        assert_eq!(near.climbable, id);
        assert!((near.closest_point - vec3(0.5, 1.5, 0.0)).length() < 1e-5, "{:?}", near.closest_point);
        assert!((near.normal + Vec3::X).length() < 1e-5, "{:?}", near.normal);
        assert!((near.length() - 2.0).abs() < 1e-5);
        for v in near.edge {
            assert!((v.x - 0.5).abs() < 1e-5 && (v.y - 1.5).abs() < 1e-5, "{v:?}");
        }

        let (_, far) = t.nearest(1).unwrap();
        assert!((far.closest_point - vec3(1.0, 1.5, 0.0)).length() < 1e-5);
        assert!((far.normal - Vec3::X).length() < 1e-5);
        let d: Vec<f32> = t.iter().map(|(_, e)| e.distance).collect();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test] fn handle_survives_motion_and_drops_out_of_range() {
        let (mut s, id) = scene_with_ledge(vec3(0.0, 1.25, 0.75));
        let mut t = EdgeTracker::new(EdgeDetectionSettings::default());
        let center = vec3(0.0, 1.4, 0.0);
        t.update(&s, center);
        let (h, first) = t.nearest(0).map(|(h, e)| (h, *e)).unwrap();

        s.set_transform(id, Transform { pos: vec3(0.2, 1.25, 0.95), ..Default::default() });
        let st = t.update(&s, center);
        assert_eq!(st.created, 0);
        let moved = t.get(h).unwrap();
        assert_eq!(moved.key(), first.key());
        assert!(moved.distance > first.distance);

        s.set_transform(id, Transform { pos: vec3(0.0, 1.25, 10.0), ..Default::default() });
        t.update(&s, center);
        assert!(t.get(h).is_none());
        assert!(t.is_empty());
    }
}
