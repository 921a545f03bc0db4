use riftclimb_core::{types::Vec3, MeshId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aabb::Aabb;
use crate::triangle::Triangle;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("{0} is not readable")]
    NotReadable(MeshId),
    #[error("{mesh}: index buffer of length {len} is malformed (vertex count {verts})")]
    MalformedIndices { mesh: MeshId, len: usize, verts: usize },
    #[error("{mesh}: {normals} normals for {verts} vertices")]
    NormalCountMismatch { mesh: MeshId, normals: usize, verts: usize },
}

/// Object-space triangle soup with per-vertex normals.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    #[inline] pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }

    /// Triangle `i` with its face normal averaged from the vertex normals.
    pub fn triangle(&self, i: usize) -> Triangle {
        let ix = |k: usize| self.indices[i * 3 + k] as usize;
        let (a, b, c) = (ix(0), ix(1), ix(2));
        let n = (self.normals[a] + self.normals[b] + self.normals[c]) / 3.0;
        Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c], n)
    }

    pub fn bounds(&self) -> Aabb { Aabb::from_points(self.vertices.iter().copied()).unwrap_or_default() }

    fn check(&self, mesh: MeshId) -> Result<(), MeshError> {
        let verts = self.vertices.len();
        if self.indices.len() % 3 != 0 || self.indices.iter().any(|&i| i as usize >= verts) {
            return Err(MeshError::MalformedIndices { mesh, len: self.indices.len(), verts });
        }
        if self.normals.len() != verts {
            return Err(MeshError::NormalCountMismatch { mesh, normals: self.normals.len(), verts });
        }
        Ok(())
    }

    /* ---- builders ---- */

    // quad centred on `c` spanning ±u, ±v; wound so the cross normal is u × v
    fn push_quad(&mut self, c: Vec3, u: Vec3, v: Vec3) {
        let base = self.vertices.len() as u32;
        let n = u.cross(v).normalize_or_zero();
        for p in [c - u - v, c + u - v, c + u + v, c - u + v] {
            self.vertices.push(p);
            self.normals.push(n);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Axis-aligned box centred on the origin with outward flat-shaded faces.
    pub fn cuboid(he: Vec3) -> Self {
        let mut m = MeshData::default();
        let (x, y, z) = (Vec3::X, Vec3::Y, Vec3::Z);
        for (n, u, v) in [(x, y, z), (-x, z, y), (y, z, x), (-y, x, z), (z, x, y), (-z, y, x)] {
            m.push_quad(n * he, u * he, v * he);
        }
        m
    }

    /// Single-sided `width` × `height` rectangle in the XY plane facing -Z, bottom edge at y = 0.
    pub fn quad(width: f32, height: f32) -> Self {
        let mut m = MeshData::default();
        m.push_quad(Vec3::new(0.0, height * 0.5, 0.0), Vec3::Y * (height * 0.5), Vec3::X * (width * 0.5));
        m
    }
}

/// A mesh asset as handed over by the content pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshAsset {
    pub id: MeshId,
    #[serde(default = "readable_default")]
    pub readable: bool,
    pub data: MeshData,
}

fn readable_default() -> bool { true }

impl MeshAsset {
    pub fn new(id: MeshId, data: MeshData) -> Self { Self { id, readable: true, data } }

    /// Validated read access to the mesh buffers.
    pub fn read(&self) -> Result<&MeshData, MeshError> {
        if !self.readable { return Err(MeshError::NotReadable(self.id)); }
        self.data.check(self.id)?;
        Ok(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn cuboid_winding_outward() {
        let m = MeshData::cuboid(Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(m.triangle_count(), 12);
        for i in 0..m.triangle_count() {
            let t = m.triangle(i);
            assert!(t.cross().normalize().dot(t.normal) > 0.99);
            assert!(t.center().dot(t.normal) > 0.0);
        }
    }
    #[test] fn quad_faces_minus_z() {
        let m = MeshData::quad(2.0, 3.0);
        let t = m.triangle(0);
        assert!((t.normal + Vec3::Z).length() < 1e-6);
        assert!((m.bounds().max - Vec3::new(1.0, 3.0, 0.0)).length() < 1e-6);
    }
    #[test] fn read_rejects_bad_buffers() {
        let mut a = MeshAsset::new(MeshId(3), MeshData::cuboid(Vec3::ONE));
        assert!(a.read().is_ok());
        a.data.indices.push(0);
        assert!(matches!(a.read(), Err(MeshError::MalformedIndices { .. })));
        a.data.indices.truncate(36);
        a.data.normals.pop();
        assert!(matches!(a.read(), Err(MeshError::NormalCountMismatch { .. })));
        a.readable = false;
        assert_eq!(a.read().unwrap_err(), MeshError::NotReadable(MeshId(3)));
    }
}
