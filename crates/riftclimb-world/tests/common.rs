#![allow(dead_code)]
use riftclimb_collision::{Scene, Tag};
use riftclimb_controllers::{helpers::Side, Frames};
use riftclimb_core::{types::{Transform, Vec3}, vec3, ClimbableId, Isometry, MeshId};
use riftclimb_geom::{MeshAsset, MeshData};
use riftclimb_world::{AgentId, ClimbProfile, ClimbWorld};

pub const DT: f32 = 0.1;

/// Box whose top-front edge is 1 m wide at y = 1.5, z = 0.5, normal -Z.
pub fn world_with_box(he: Vec3, center: Vec3) -> (ClimbWorld, AgentId, ClimbableId) {
    let mut scene = Scene::new();
    let m = scene.add_mesh(MeshAsset::new(MeshId(1), MeshData::cuboid(he)));
    let id = scene.spawn(m, Tag::Climbable, Transform { pos: center, ..Default::default() });
    let mut world = ClimbWorld::new(scene, ClimbProfile::default()).unwrap();
    let agent = world.spawn_agent(Isometry { pos: vec3(0.0, 0.1, 0.0), ..Default::default() });
    (world, agent, id)
}

/// One box per `(half extents, center, tag)`, each with its own mesh. Ids follow input order.
pub fn world_with_boxes(boxes: &[(Vec3, Vec3, Tag)]) -> (ClimbWorld, AgentId, Vec<ClimbableId>) {
    let mut scene = Scene::new();
    let ids = boxes
        .iter()
        .enumerate()
        .map(|(i, &(he, center, tag))| {
            let m = scene.add_mesh(MeshAsset::new(MeshId(i as u32 + 1), MeshData::cuboid(he)));
            scene.spawn(m, tag, Transform { pos: center, ..Default::default() })
        })
        .collect();
    let mut world = ClimbWorld::new(scene, ClimbProfile::default()).unwrap();
    let agent = world.spawn_agent(Isometry { pos: vec3(0.0, 0.1, 0.0), ..Default::default() });
    (world, agent, ids)
}

/// 0.3 m wide, 0.1 m deep wall; top-front edge at y = 1.5, z = 0.5. Its end edges are
/// too short to track.
pub fn pillar() -> (Vec3, Vec3, Tag) { (vec3(0.15, 0.75, 0.05), vec3(0.0, 0.75, 0.55), Tag::Climbable) }

/// 1 m long, 0.1 m deep climbable board.
pub fn board(center: Vec3, height: f32) -> (Vec3, Vec3, Tag) { (vec3(0.5, height * 0.5, 0.05), center, Tag::Climbable) }

pub fn ledge_world() -> (ClimbWorld, AgentId, ClimbableId) {
    world_with_box(vec3(0.5, 0.25, 0.25), vec3(0.0, 1.25, 0.75))
}

pub fn wall_world() -> (ClimbWorld, AgentId, ClimbableId) {
    world_with_box(vec3(0.5, 0.75, 0.25), vec3(0.0, 0.75, 0.75))
}

pub fn hands(world: &ClimbWorld, agent: AgentId) -> (Vec3, Vec3) {
    let a = world.agent(agent).unwrap();
    let f = Frames::new(a.machine.root(), world.scene());
    let h = a.machine.hooking();
    (h.hand_pos(Side::Left, &f), h.hand_pos(Side::Right, &f))
}
