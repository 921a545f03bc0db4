mod common;

use common::*;
use glam::Vec2;
use riftclimb_core::{vec3, Isometry};
use riftclimb_locomotion::{ClimbInput, ExternalMode, HorizontalDir, StateKind};
use riftclimb_world::{AgentId, AnimRecorder, AnimSink, ClimbWorld};

fn press_climb(world: &mut ClimbWorld, agent: AgentId, sink: &mut dyn AnimSink) {
    world.set_input(agent, ClimbInput { climb: true, ..Default::default() }, ExternalMode::Airborne);
    world.step(DT, sink);
    world.set_input(agent, ClimbInput::default(), ExternalMode::Airborne);
}

fn kind(world: &ClimbWorld, agent: AgentId) -> StateKind {
    world.agent(agent).unwrap().machine.kind()
}

#[test]
fn hook_ledge_places_hands_symmetrically_and_hangs() {
    let (mut world, agent, _) = ledge_world();
    let mut sink = AnimRecorder::default();
    press_climb(&mut world, agent, &mut sink);
    assert_eq!(kind(&world, agent), StateKind::Hooking);

    let (l, r) = hands(&world, agent);
    assert!((l - vec3(-0.1, 1.44, 0.48)).length() < 1e-4, "{l:?}");
    assert!((r - vec3(0.1, 1.44, 0.48)).length() < 1e-4, "{r:?}");

    for _ in 0..10 { world.step(DT, &mut sink); }
    assert_eq!(kind(&world, agent), StateKind::EdgeClimbing);
    let p = sink.last(agent).unwrap();
    assert!(p.climbing);
    assert!(!p.grounded);
    assert_eq!(p.hanging_blend, 0.0);
}

#[test]
fn hook_wall_converges_to_foot_support() {
    let (mut world, agent, _) = wall_world();
    let mut sink = AnimRecorder::default();
    press_climb(&mut world, agent, &mut sink);
    for _ in 0..10 { world.step(DT, &mut sink); }
    assert_eq!(kind(&world, agent), StateKind::EdgeClimbing);
    assert_eq!(sink.last(agent).unwrap().hanging_blend, 1.0);
    let a = world.agent(agent).unwrap();
    assert_eq!(a.machine.hooking().left.foot_weight(), 1.0);
    assert!(a.machine.wall_angle().abs() < 1e-3);
}

#[test]
fn nothing_to_grab_stays_detached() {
    let (mut world, agent, id) = ledge_world();
    world.scene_mut().set_active(id, false);
    let mut sink = AnimRecorder::default();
    press_climb(&mut world, agent, &mut sink);
    assert_eq!(kind(&world, agent), StateKind::Detached);
    assert!(world.agent(agent).unwrap().tracker.is_empty());
    assert!(!sink.last(agent).unwrap().climbing);
}

#[test]
fn root_belongs_to_the_machine_while_climbing() {
    let (mut world, agent, _) = wall_world();
    let mut sink = AnimRecorder::default();
    assert!(world.set_external_root(agent, Isometry { pos: vec3(0.0, 0.1, 0.0), ..Default::default() }));
    press_climb(&mut world, agent, &mut sink);
    assert!(!world.set_external_root(agent, Isometry::default()));

    world.set_input(agent, ClimbInput { drop: true, ..Default::default() }, ExternalMode::Airborne);
    world.step(DT, &mut sink);
    // drop is only honoured once climbing
    for _ in 0..10 { world.step(DT, &mut sink); }
    assert_eq!(kind(&world, agent), StateKind::Detached);
    assert!(world.set_external_root(agent, Isometry::default()));
    assert_eq!(sink.last(agent).unwrap().hanging_blend, 1.0);
}

#[test]
fn only_one_motion_runs_at_a_time() {
    let (mut world, agent, _) = wall_world();
    let mut sink = AnimRecorder::default();
    press_climb(&mut world, agent, &mut sink);
    for _ in 0..10 { world.step(DT, &mut sink); }

    let left = ClimbInput { move_axis: Vec2::new(-1.0, 0.0), ..Default::default() };
    let right = ClimbInput { move_axis: Vec2::new(1.0, 0.0), ..Default::default() };
    world.set_input(agent, left, ExternalMode::Airborne);
    world.step(DT, &mut sink);
    assert!(world.agent(agent).unwrap().machine.busy());

    // an opposing request mid-flight is ignored
    world.set_input(agent, right, ExternalMode::Airborne);
    world.step(DT, &mut sink);
    assert!(world.agent(agent).unwrap().machine.busy());

    world.set_input(agent, ClimbInput::default(), ExternalMode::Airborne);
    for _ in 0..20 {
        if !world.agent(agent).unwrap().machine.busy() { break; }
        world.step(DT, &mut sink);
    }
    let a = world.agent(agent).unwrap();
    assert!(!a.machine.busy());
    assert_eq!(a.machine.prev_dir(), HorizontalDir::Left);
    let (l, r) = hands(&world, agent);
    assert!((l - vec3(-0.5, 1.44, 0.48)).length() < 1e-3, "{l:?}");
    assert!((r - vec3(0.1, 1.44, 0.48)).length() < 1e-3, "{r:?}");
}

#[test]
fn identical_runs_hash_identically() {
    let run = || {
        let (mut world, agent, _) = wall_world();
        let mut sink = ();
        press_climb(&mut world, agent, &mut sink);
        (0..8).map(|_| world.step(DT, &mut sink).hash).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
