//! Object-space edge extraction. Runs once per mesh asset; the result is
//! transform independent and shared by every instance of the mesh.
use std::collections::HashMap;

use riftclimb_core::{hash_vec3, math::angle_deg, MeshId, StepHasher};
use riftclimb_geom::{Edge, MeshAsset, MeshData, Triangle, TrianglePair};
use tracing::{debug, error};

use crate::settings::EdgeDetectionSettings;

/// Edge → adjoining triangles, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeMap {
    entries: Vec<(Edge, TrianglePair)>,
    index: HashMap<Edge, usize>,
}

impl EdgeMap {
    #[inline] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    #[inline] pub fn iter(&self) -> impl Iterator<Item = &(Edge, TrianglePair)> { self.entries.iter() }
    pub fn get(&self, e: &Edge) -> Option<&TrianglePair> { self.index.get(e).map(|&i| &self.entries[i].1) }

    fn fill(&mut self, e: Edge, t: Triangle) {
        match self.index.get(&e) {
            Some(&i) => self.entries[i].1.add(t),
            None => {
                self.index.insert(e, self.entries.len());
                self.entries.push((e, TrianglePair::new(t)));
            }
        }
    }

    fn retain(mut self, mut keep: impl FnMut(&Edge, &TrianglePair) -> bool) -> Self {
        self.entries.retain(|(e, p)| keep(e, p));
        self.index = self.entries.iter().enumerate().map(|(i, (e, _))| (*e, i)).collect();
        self
    }

    /// BLAKE3 digest over keys and triangle memberships in iteration order.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(&(self.entries.len() as u64).to_le_bytes());
        let tri = |h: &mut StepHasher, t: &Triangle| { for v in [t.v0, t.v1, t.v2] { hash_vec3(h, &v); } };
        for (e, p) in &self.entries {
            hash_vec3(&mut h, &e.v0);
            hash_vec3(&mut h, &e.v1);
            tri(&mut h, &p.t0);
            match &p.t1 { Some(t) => { h.update_bytes(&[1]); tri(&mut h, t); } None => h.update_bytes(&[0]) }
        }
        h.finalize()
    }
}

/// Registers the three edges of every triangle. Malformed triangles are skipped.
pub fn build_edge_pairs(mesh: &MeshData) -> EdgeMap {
    let mut map = EdgeMap::default();
    let nv = mesh.vertices.len();
    for i in 0..mesh.triangle_count() {
        let ix = &mesh.indices[i * 3..i * 3 + 3];
        if ix.iter().any(|&k| k as usize >= nv || k as usize >= mesh.normals.len()) { continue; }
        let t = mesh.triangle(i);
        map.fill(Edge::new(t.v0, t.v1), t);
        map.fill(Edge::new(t.v1, t.v2), t);
        map.fill(Edge::new(t.v0, t.v2), t);
    }
    map
}

/// Dihedral angle between two adjoining faces, or `None` when they fold concave.
pub fn neighbour_angle(t0: &Triangle, t1: &Triangle) -> Option<f32> {
    let n1 = t0.cross();
    if n1.dot(t1.center() - t0.center()) >= 0.0 { return None; }
    Some(angle_deg(n1, t1.cross()))
}

/// Exclusive on both ends.
#[inline]
pub fn within_neighbour_window(angle: f32, s: &EdgeDetectionSettings) -> bool {
    angle > s.min_triangle_neighbour_angle && angle < s.max_triangle_neighbour_angle
}

/// Convex grip edges of `mesh`. Boundary edges (one adjoining face) never qualify.
pub fn extract_edges(mesh: &MeshData, s: &EdgeDetectionSettings) -> EdgeMap {
    build_edge_pairs(mesh).retain(|_, p| match p.both() {
        Some((t0, t1)) => neighbour_angle(t0, t1).is_some_and(|a| within_neighbour_window(a, s)),
        None => false,
    })
}

/// Parsed edge maps keyed by mesh asset.
#[derive(Default)]
pub struct EdgeCache {
    maps: HashMap<MeshId, EdgeMap>,
}

impl EdgeCache {
    pub fn new() -> Self { Self::default() }

    /// Parses on first use. Unreadable assets log once and cache an empty map.
    pub fn get_or_parse(&mut self, asset: &MeshAsset, s: &EdgeDetectionSettings) -> &EdgeMap {
        self.maps.entry(asset.id).or_insert_with(|| match asset.read() {
            Ok(mesh) => {
                let map = extract_edges(mesh, s);
                debug!(mesh = %asset.id, edges = map.len(), "parsed mesh edges");
                map
            }
            Err(e) => {
                error!(mesh = %asset.id, "{e}; it contributes no climbable edges");
                EdgeMap::default()
            }
        })
    }

    #[inline] pub fn get(&self, id: MeshId) -> Option<&EdgeMap> { self.maps.get(&id) }
    #[inline] pub fn len(&self) -> usize { self.maps.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.maps.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftclimb_core::{vec3, types::Vec3};

    // hinge along X: flat face with +Y normal, second face folded down by `deg`
    fn hinge(deg: f32) -> MeshData {
        let (s, c) = deg.to_radians().sin_cos();
        let v = vec![vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.5, 0.0, -1.0), vec3(0.5, -s, c)];
        let n0 = Vec3::Y;
        let n1 = vec3(0.0, c, s);
        MeshData { vertices: v, indices: vec![0, 1, 2, 1, 0, 3], normals: vec![(n0 + n1) * 0.5, (n0 + n1) * 0.5, n0, n1] }
    }

    fn shared() -> Edge { Edge::new(Vec3::ZERO, Vec3::X) }

    #[test] fn cuboid_keeps_the_twelve_box_edges() {
        let m = MeshData::cuboid(vec3(1.0, 0.5, 0.5));
        assert_eq!(build_edge_pairs(&m).len(), 18);
        let map = extract_edges(&m, &EdgeDetectionSettings::default());
        assert_eq!(map.len(), 12);
        assert!(map.get(&Edge::new(vec3(1.0, 0.5, -0.5), vec3(-1.0, 0.5, -0.5))).is_some());
    }

    #[test] fn deterministic() {
        let m = MeshData::cuboid(vec3(0.7, 0.3, 1.1));
        let s = EdgeDetectionSettings::default();
        let (a, b) = (extract_edges(&m, &s), extract_edges(&m, &s));
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
        let keys: Vec<_> = a.iter().map(|(e, _)| *e).collect();
        assert!(keys.iter().zip(b.iter()).all(|(k, (e, _))| k == e));
    }

    #[test] fn dihedral_window_is_exclusive() {
        let s = EdgeDetectionSettings::default();
        assert!(!within_neighbour_window(s.min_triangle_neighbour_angle, &s));
        assert!(!within_neighbour_window(s.max_triangle_neighbour_angle, &s));
        let eps = 0.01;
        for (deg, keep) in [(30.0 - eps, false), (30.0 + eps, true), (160.0 - eps, true), (160.0 + eps, false)] {
            let map = extract_edges(&hinge(deg), &s);
            assert_eq!(map.get(&shared()).is_some(), keep, "angle {deg}");
        }
    }

    #[test] fn concave_fold_rejected() {
        // fold the second face upward instead
        let mut m = hinge(90.0);
        m.vertices[3] = vec3(0.5, 1.0, 0.0);
        let pairs = build_edge_pairs(&m);
        let (t0, t1) = pairs.get(&shared()).and_then(|p| p.both()).unwrap();
        assert!(neighbour_angle(t0, t1).is_none());
        assert!(extract_edges(&m, &EdgeDetectionSettings::default()).is_empty());
    }

    #[test] fn unreadable_mesh_caches_empty() {
        let mut asset = MeshAsset::new(MeshId(9), MeshData::cuboid(Vec3::ONE));
        asset.readable = false;
        let mut cache = EdgeCache::new();
        assert!(cache.get_or_parse(&asset, &EdgeDetectionSettings::default()).is_empty());
        assert_eq!(cache.len(), 1);
    }
}
