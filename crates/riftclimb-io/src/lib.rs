use anyhow::{Context, Result};
use glam::Vec2;
use riftclimb_collision::{Collider, Scene, Tag};
use riftclimb_core::{types::Transform, vec3, MeshId};
use riftclimb_geom::{MeshAsset, MeshData};
use riftclimb_locomotion::{ClimbInput, ExternalMode};
use riftclimb_world::ClimbProfile;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// On-disk scene: mesh assets plus placed instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: u32,
    pub meshes: Vec<MeshAsset>,
    pub colliders: Vec<Collider>,
}

impl SceneFile {
    pub fn from_scene(scene: &Scene) -> Self {
        Self { version: 1, meshes: scene.meshes().cloned().collect(), colliders: scene.colliders().to_vec() }
    }

    pub fn into_scene(self) -> Scene {
        let mut s = Scene::new();
        for m in self.meshes { s.add_mesh(m); }
        for c in self.colliders { s.insert(c); }
        s
    }
}

/// One scripted input held for `ticks` steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptStep {
    pub ticks: u32,
    #[serde(default)]
    pub input: ClimbInput,
    #[serde(default)]
    pub mode: ExternalMode,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    let json = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Loads and validates a profile. Missing fields keep their defaults.
pub fn load_profile(path: &Path) -> Result<ClimbProfile> {
    let p: ClimbProfile = read_json(path)?;
    p.validate().with_context(|| format!("invalid profile {}", path.display()))?;
    debug!(path = %path.display(), "profile loaded");
    Ok(p)
}

pub fn save_profile(profile: &ClimbProfile, path: &Path, pretty: bool) -> Result<()> {
    write_json(profile, path, pretty)
}

pub fn load_scene(path: &Path) -> Result<Scene> {
    let f: SceneFile = read_json(path)?;
    debug!(path = %path.display(), meshes = f.meshes.len(), colliders = f.colliders.len(), "scene loaded");
    Ok(f.into_scene())
}

pub fn save_scene(scene: &Scene, path: &Path, pretty: bool) -> Result<()> {
    write_json(&SceneFile::from_scene(scene), path, pretty)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> { read_json(path) }

/// A 1 m ledge in front of the agent and a free-climbable wall to its right.
/// Lowercase hex of a step digest.
pub fn hash_hex(hash: [u8; 32]) -> String { blake3::Hash::from(hash).to_hex().to_string() }

pub fn default_scene() -> Scene {
    let mut s = Scene::new();
    let ledge = s.add_mesh(MeshAsset::new(MeshId(1), MeshData::cuboid(vec3(0.5, 0.75, 0.25))));
    let wall = s.add_mesh(MeshAsset::new(MeshId(2), MeshData::cuboid(vec3(0.1, 1.5, 1.0))));
    s.spawn(ledge, Tag::Climbable, Transform { pos: vec3(0.0, 0.75, 0.75), ..Default::default() });
    s.spawn(wall, Tag::FreeClimbable, Transform { pos: vec3(1.2, 1.5, 0.5), ..Default::default() });
    s
}

/// Approach, hook, then move left, right and up.
pub fn default_script() -> Vec<ScriptStep> {
    let held = |x: f32, y: f32, ticks: u32| ScriptStep {
        ticks,
        input: ClimbInput { move_axis: Vec2::new(x, y), ..Default::default() },
        mode: ExternalMode::Airborne,
    };
    vec![
        ScriptStep { ticks: 2, input: ClimbInput::default(), mode: ExternalMode::Grounded },
        ScriptStep { ticks: 1, input: ClimbInput { climb: true, ..Default::default() }, mode: ExternalMode::Airborne },
        held(0.0, 0.0, 5),
        held(-1.0, 0.0, 12),
        held(1.0, 0.0, 24),
        held(0.0, 1.0, 15),
    ]
}
